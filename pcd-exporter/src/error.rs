use std::io;
use std::path::PathBuf;

use pcd_core::error::PointCloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Las { path: PathBuf, source: las::Error },

    #[error("failed to write {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    PointCloud(#[from] PointCloudError),
}
