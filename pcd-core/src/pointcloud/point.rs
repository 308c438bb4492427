use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::PointCloudError;

use super::bounds::{Axis, Bounds};

/// 3D point coordinates stored as three equal-length columns.
///
/// Insertion order is the point order; every operation except random
/// sampling preserves it. The columns are private so the equal-length
/// invariant cannot be broken from outside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl PointCloud {
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self, PointCloudError> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(PointCloudError::LengthMismatch {
                x: x.len(),
                y: y.len(),
                z: z.len(),
            });
        }
        Ok(Self { x, y, z })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    pub fn axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    pub fn push(&mut self, x: f64, y: f64, z: f64) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| [x, y, z])
    }

    pub fn extend_from(&mut self, other: &PointCloud) {
        self.x.extend_from_slice(&other.x);
        self.y.extend_from_slice(&other.y);
        self.z.extend_from_slice(&other.z);
    }

    /// New cloud with self's points followed by other's, order preserved.
    /// Does not deduplicate.
    pub fn concat(&self, other: &PointCloud) -> PointCloud {
        let mut out = PointCloud::with_capacity(self.len() + other.len());
        out.extend_from(self);
        out.extend_from(other);
        out
    }

    /// Subset of points at `indices`, in `indices` order.
    pub fn select(&self, indices: impl IntoIterator<Item = usize>) -> PointCloud {
        let mut out = PointCloud::empty();
        for i in indices {
            out.push(self.x[i], self.y[i], self.z[i]);
        }
        out
    }

    /// Tight box over all points.
    pub fn bounds(&self) -> Result<Bounds, PointCloudError> {
        if self.is_empty() {
            return Err(PointCloudError::EmptyCloud);
        }
        let mut min = [f64::MAX, f64::MAX, f64::MAX];
        let mut max = [f64::MIN, f64::MIN, f64::MIN];
        for [x, y, z] in self.points() {
            for (i, value) in [x, y, z].into_iter().enumerate() {
                min[i] = min[i].min(value);
                max[i] = max[i].max(value);
            }
        }
        Ok(Bounds::from_min_max(min, max))
    }
}

impl Add for PointCloud {
    type Output = PointCloud;

    fn add(self, rhs: PointCloud) -> PointCloud {
        self.concat(&rhs)
    }
}
