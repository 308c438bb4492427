use std::path::Path;

use las::{Builder, Transform, Vector, Writer};

use pcd_core::pointcloud::point::PointCloud;

use crate::error::ExportError;

/// Coordinate resolution written to LAS headers.
pub static SCALE_FACTOR: f64 = 0.001;

const GENERATING_SOFTWARE: &str = "pcd-exporter";
const SYSTEM_IDENTIFIER: &str = "EXTRACTION";

/// Write all points of `cloud` to a LAS file (or LAZ, chosen by the
/// path extension).
///
/// The header carries the cloud's derived bounds and point count plus
/// fixed format constants: the scale factor, rounded-minimum offsets
/// and the software/system identifiers. An empty cloud has no bounds
/// and cannot be written.
pub fn write_las(path: &Path, cloud: &PointCloud) -> Result<(), ExportError> {
    let bounds = cloud.bounds()?;
    let (min, _) = bounds.to_min_max();

    let las_error = |source| ExportError::Las {
        path: path.to_path_buf(),
        source,
    };

    // Builder's default point format (0) is coordinates only.
    let mut builder = Builder::from((1, 2));
    builder.generating_software = GENERATING_SOFTWARE.to_string();
    builder.system_identifier = SYSTEM_IDENTIFIER.to_string();
    builder.transforms = Vector {
        x: Transform {
            scale: SCALE_FACTOR,
            offset: min[0].round(),
        },
        y: Transform {
            scale: SCALE_FACTOR,
            offset: min[1].round(),
        },
        z: Transform {
            scale: SCALE_FACTOR,
            offset: min[2].round(),
        },
    };
    let header = builder.into_header().map_err(las_error)?;

    let mut writer = Writer::from_path(path, header).map_err(las_error)?;
    for [x, y, z] in cloud.points() {
        let point = las::Point {
            x,
            y,
            z,
            ..Default::default()
        };
        writer.write(point).map_err(las_error)?;
    }
    writer.close().map_err(las_error)?;
    Ok(())
}
