use thiserror::Error;

use crate::pointcloud::bounds::Bounds;

#[derive(Error, Debug)]
pub enum PointCloudError {
    /// Bounds were requested for a cloud with no points.
    #[error("cannot derive bounds from a point cloud with no points")]
    EmptyCloud,

    /// A crop kept no points and the caller disallowed an empty result.
    #[error("no points within crop bounds: {bounds}")]
    EmptyCrop { bounds: Bounds },

    #[error("coordinate columns differ in length (x: {x}, y: {y}, z: {z})")]
    LengthMismatch { x: usize, y: usize, z: usize },
}
