use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use pcd_core::pointcloud::point::PointCloud;

use crate::error::ExportError;

/// Write `cloud` as three-column (x y z) whitespace-delimited text.
pub fn write_txt(path: &Path, cloud: &PointCloud) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    for [x, y, z] in cloud.points() {
        writeln!(writer, "{} {} {}", x, y, z).map_err(io_error)?;
    }
    writer.flush().map_err(io_error)?;
    Ok(())
}
