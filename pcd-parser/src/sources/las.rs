use std::path::Path;

use las::Reader;

use pcd_core::pointcloud::bounds::Bounds;
use pcd_core::pointcloud::point::PointCloud;

use crate::error::SourceError;

use super::PointSource;

/// LAS/LAZ files. Bounds come from the file header alone.
pub struct LasSource;

impl LasSource {
    fn open(path: &Path) -> Result<Reader, SourceError> {
        Reader::from_path(path).map_err(|source| SourceError::Las {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl PointSource for LasSource {
    fn read_coordinates(&self, path: &Path) -> Result<PointCloud, SourceError> {
        let mut reader = Self::open(path)?;
        // The header count is only a capacity hint, not trusted as exact.
        let mut cloud = PointCloud::with_capacity(reader.header().number_of_points() as usize);
        for point in reader.points() {
            let point = point.map_err(|source| SourceError::Las {
                path: path.to_path_buf(),
                source,
            })?;
            cloud.push(point.x, point.y, point.z);
        }
        Ok(cloud)
    }

    fn read_bounds(&self, path: &Path) -> Result<Bounds, SourceError> {
        let reader = Self::open(path)?;
        let bounds = reader.header().bounds();
        Ok(Bounds::from_min_max(
            [bounds.min.x, bounds.min.y, bounds.min.z],
            [bounds.max.x, bounds.max.y, bounds.max.z],
        ))
    }
}
