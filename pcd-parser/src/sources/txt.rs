use std::fs::File;
use std::io::{BufRead as _, BufReader};
use std::path::Path;

use pcd_core::pointcloud::bounds::Bounds;
use pcd_core::pointcloud::point::PointCloud;

use crate::error::SourceError;

use super::PointSource;

/// Whitespace-delimited three-column (x y z) text, the `.txt`/`.xyz`
/// exchange format.
pub struct TextSource;

fn malformed(path: &Path, line: usize) -> SourceError {
    SourceError::MalformedRecord {
        path: path.to_path_buf(),
        line,
    }
}

impl PointSource for TextSource {
    fn read_coordinates(&self, path: &Path) -> Result<PointCloud, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut cloud = PointCloud::empty();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (x, y, z) = match (fields.next(), fields.next(), fields.next()) {
                (Some(x), Some(y), Some(z)) => (x, y, z),
                _ => return Err(malformed(path, index + 1)),
            };
            let parse = |field: &str| {
                field
                    .parse::<f64>()
                    .map_err(|_| malformed(path, index + 1))
            };
            cloud.push(parse(x)?, parse(y)?, parse(z)?);
        }
        Ok(cloud)
    }

    fn read_bounds(&self, path: &Path) -> Result<Bounds, SourceError> {
        let bounds = self.read_coordinates(path)?.bounds()?;
        Ok(bounds)
    }
}
