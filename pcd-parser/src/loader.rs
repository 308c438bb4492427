use std::path::PathBuf;

use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};

use pcd_core::pointcloud::bounds::Bounds;
use pcd_core::pointcloud::partition::merge;
use pcd_core::pointcloud::point::PointCloud;

use crate::error::SourceError;
use crate::sources::PointSource;

/// Options for [`load`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Load only files intersecting these bounds, then crop the
    /// aggregate to them.
    pub bounds: Option<Bounds>,
    /// Whether the final crop may produce an empty cloud. Only
    /// meaningful together with `bounds`.
    pub allow_empty: Option<bool>,
}

/// Keep only paths whose stored bounds intersect `bounds`.
///
/// Order-preserving and idempotent. Makes scanning large file manifests
/// cheap: candidates are rejected on metadata before any coordinate
/// data is decoded.
pub fn filter_paths(
    source: &dyn PointSource,
    paths: &[PathBuf],
    bounds: &Bounds,
) -> Result<Vec<PathBuf>, SourceError> {
    let mut kept = Vec::with_capacity(paths.len());
    for path in paths {
        if bounds.intersects(&source.read_bounds(path)?) {
            kept.push(path.clone());
        }
    }
    Ok(kept)
}

/// Load and concatenate coordinate data from `paths` into one cloud.
///
/// Any failing file aborts the whole load. Result point order follows
/// the input path order.
pub fn load(
    source: &(dyn PointSource + Sync),
    paths: &[PathBuf],
    options: &LoadOptions,
) -> Result<PointCloud, SourceError> {
    if options.bounds.is_none() && options.allow_empty.is_some() {
        return Err(SourceError::AllowEmptyWithoutBounds);
    }

    let paths = match &options.bounds {
        Some(bounds) => filter_paths(source, paths, bounds)?,
        None => paths.to_vec(),
    };

    let mut cloud = match paths.len() {
        0 => PointCloud::empty(),
        1 => source.read_coordinates(&paths[0])?,
        _ => {
            // Files are read in parallel; the indexed collect pins the
            // concatenation order to the input path order regardless of
            // completion order.
            let clouds = paths
                .par_iter()
                .map(|path| source.read_coordinates(path))
                .collect::<Result<Vec<_>, _>>()?;
            merge(&clouds)
        }
    };

    if let Some(bounds) = &options.bounds {
        cloud = cloud.crop(bounds, options.allow_empty.unwrap_or(false))?;
    }

    Ok(cloud)
}
