use std::io;
use std::path::PathBuf;

use pcd_core::error::PointCloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Las { path: PathBuf, source: las::Error },

    #[error("failed to read {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed coordinate record at {}:{line}", path.display())]
    MalformedRecord { path: PathBuf, line: usize },

    #[error("required column '{column}' is missing in {}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("argument `allow_empty` is meaningless without `bounds`")]
    AllowEmptyWithoutBounds,

    #[error(transparent)]
    PointCloud(#[from] PointCloudError),
}
