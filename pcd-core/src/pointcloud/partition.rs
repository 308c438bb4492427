use crate::error::PointCloudError;

use super::bounds::{Axis, Bound, Bounds};
use super::point::PointCloud;

/// Marks each point falling outside `bounds` on any constrained side.
///
/// Comparisons are lower-inclusive, upper-exclusive: a point is out when
/// `coord < min` or `coord >= max`. Unbounded sides exclude nothing.
pub fn out_of_bounds_mask(cloud: &PointCloud, bounds: &Bounds) -> Vec<bool> {
    let mut mask = vec![false; cloud.len()];
    for axis in Axis::ALL {
        let coords = cloud.axis(axis);
        if let Bound::Value(min) = bounds.min(axis) {
            for (out, &coord) in mask.iter_mut().zip(coords) {
                *out |= coord < min;
            }
        }
        if let Bound::Value(max) = bounds.max(axis) {
            for (out, &coord) in mask.iter_mut().zip(coords) {
                *out |= coord >= max;
            }
        }
    }
    mask
}

impl PointCloud {
    /// Crop to `bounds`, keeping relative point order.
    ///
    /// When every point is out of bounds the result is an empty cloud if
    /// `allow_empty`, otherwise `EmptyCrop` carrying the attempted bounds.
    pub fn crop(&self, bounds: &Bounds, allow_empty: bool) -> Result<PointCloud, PointCloudError> {
        let mask = out_of_bounds_mask(self, bounds);
        if mask.iter().all(|&out| out) {
            if allow_empty {
                return Ok(PointCloud::empty());
            }
            return Err(PointCloudError::EmptyCrop { bounds: *bounds });
        }
        Ok(self.take_by_mask(&mask, false))
    }

    /// Partition against `bounds` into a `(kept, removed)` pair.
    ///
    /// Both halves own independent buffers and together hold every point
    /// of `self`. Callers wanting the in-place variant rebind their own
    /// binding to `removed`.
    pub fn partition(
        &self,
        bounds: &Bounds,
        allow_empty: bool,
    ) -> Result<(PointCloud, PointCloud), PointCloudError> {
        let mask = out_of_bounds_mask(self, bounds);
        if !allow_empty && mask.iter().all(|&out| out) {
            return Err(PointCloudError::EmptyCrop { bounds: *bounds });
        }
        Ok((self.take_by_mask(&mask, false), self.take_by_mask(&mask, true)))
    }

    fn take_by_mask(&self, mask: &[bool], out_of_bounds: bool) -> PointCloud {
        let count = mask.iter().filter(|&&out| out == out_of_bounds).count();
        let mut cloud = PointCloud::with_capacity(count);
        for (i, [x, y, z]) in self.points().enumerate() {
            if mask[i] == out_of_bounds {
                cloud.push(x, y, z);
            }
        }
        cloud
    }

    /// Split at `locations` along `axis` into `locations.len() + 1`
    /// contiguous, gapless segments ordered low to high.
    ///
    /// Locations are sorted first, so the result order does not depend on
    /// the input order. Segment `k` holds points with axis value in
    /// `[location_{k-1}, location_k)`; duplicate or out-of-range locations
    /// produce empty segments.
    pub fn split(
        &self,
        axis: Axis,
        locations: &[f64],
        allow_empty: bool,
    ) -> Result<Vec<PointCloud>, PointCloudError> {
        let mut locations = locations.to_vec();
        locations.sort_by(f64::total_cmp);

        // Peel the upper segment off at each location, highest first.
        let mut rest = self.clone();
        let mut segments = Vec::with_capacity(locations.len() + 1);
        for &loc in locations.iter().rev() {
            let cut = Bounds::unbounded().with_min(axis, Bound::Value(loc));
            let (upper, lower) = rest.partition(&cut, allow_empty)?;
            segments.push(upper);
            rest = lower;
        }
        segments.push(rest);
        segments.reverse();
        Ok(segments)
    }
}

/// Concatenate `clouds` into one, preserving input order.
///
/// The output buffer is sized once to the summed length, so large
/// aggregations avoid incremental reallocation.
pub fn merge(clouds: &[PointCloud]) -> PointCloud {
    let total = clouds.iter().map(PointCloud::len).sum();
    let mut merged = PointCloud::with_capacity(total);
    for cloud in clouds {
        merged.extend_from(cloud);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10 points with x from 0.0 to 0.9 in 0.1 steps, y = z = 0.
    fn tenth_steps() -> PointCloud {
        let x: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
        let n = x.len();
        PointCloud::new(x, vec![0.0; n], vec![0.0; n]).unwrap()
    }

    fn x_bounds(minx: impl Into<Bound>, maxx: impl Into<Bound>) -> Bounds {
        Bounds::new(minx, None, None, maxx, None, None)
    }

    #[test]
    fn crop_is_lower_inclusive_upper_exclusive() {
        let cloud = tenth_steps();
        let cropped = cloud.crop(&x_bounds(0.3, 0.7), false).unwrap();
        assert_eq!(cropped.x(), &[0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn point_on_lower_bound_is_kept() {
        let cloud = PointCloud::new(vec![5.0], vec![0.0], vec![0.0]).unwrap();
        let cropped = cloud.crop(&x_bounds(5.0, None), false).unwrap();
        assert_eq!(cropped.len(), 1);
    }

    #[test]
    fn point_on_upper_bound_is_excluded() {
        let cloud = PointCloud::new(vec![5.0], vec![0.0], vec![0.0]).unwrap();
        let result = cloud.crop(&x_bounds(None, 5.0), false);
        assert!(matches!(result, Err(PointCloudError::EmptyCrop { .. })));
    }

    #[test]
    fn crop_with_unbounded_box_keeps_everything() {
        let cloud = tenth_steps();
        let cropped = cloud.crop(&Bounds::unbounded(), false).unwrap();
        assert_eq!(cropped.len(), cloud.len());
    }

    #[test]
    fn crop_result_bounds_fit_in_crop_box() {
        let cloud = tenth_steps();
        let cropped = cloud.crop(&x_bounds(0.25, 0.75), false).unwrap();
        let bounds = cropped.bounds().unwrap();
        assert!(bounds.minx.value().unwrap() >= 0.25);
        assert!(bounds.maxx.value().unwrap() < 0.75);
    }

    #[test]
    fn crop_does_not_mutate_source() {
        let cloud = tenth_steps();
        let _ = cloud.crop(&x_bounds(0.3, 0.7), false).unwrap();
        assert_eq!(cloud.len(), 10);
    }

    #[test]
    fn empty_crop_allowed_when_requested() {
        let cloud = tenth_steps();
        let cropped = cloud.crop(&x_bounds(5.0, 6.0), true).unwrap();
        assert!(cropped.is_empty());
    }

    #[test]
    fn empty_crop_error_carries_bounds() {
        let cloud = tenth_steps();
        let bounds = x_bounds(5.0, 6.0);
        match cloud.crop(&bounds, false) {
            Err(PointCloudError::EmptyCrop { bounds: attempted }) => {
                assert_eq!(attempted, bounds)
            }
            other => panic!("expected EmptyCrop, got {:?}", other),
        }
    }

    #[test]
    fn crop_empty_cloud_requires_allow_empty() {
        let cloud = PointCloud::empty();
        assert!(cloud.crop(&Bounds::unbounded(), false).is_err());
        assert!(cloud.crop(&Bounds::unbounded(), true).unwrap().is_empty());
    }

    #[test]
    fn partition_conserves_points() {
        let cloud = tenth_steps();
        let (kept, removed) = cloud.partition(&x_bounds(0.3, 0.7), false).unwrap();
        assert_eq!(kept.x(), &[0.3, 0.4, 0.5, 0.6]);
        assert_eq!(removed.x(), &[0.0, 0.1, 0.2, 0.7, 0.8, 0.9]);
        assert_eq!(kept.len() + removed.len(), cloud.len());
    }

    #[test]
    fn partition_halves_are_independent() {
        let cloud = tenth_steps();
        let (kept, mut removed) = cloud.partition(&x_bounds(0.3, 0.7), false).unwrap();
        removed.push(99.0, 0.0, 0.0);
        assert_eq!(kept.len(), 4);
        assert_eq!(cloud.len(), 10);
    }

    #[test]
    fn split_produces_ordered_gapless_segments() {
        let cloud = tenth_steps();
        let segments = cloud.split(Axis::X, &[0.3, 0.7], true).unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].x(), &[0.0, 0.1, 0.2]);
        assert_eq!(segments[1].x(), &[0.3, 0.4, 0.5, 0.6]);
        assert_eq!(segments[2].x(), &[0.7, 0.8, 0.9]);
    }

    #[test]
    fn split_sorts_unsorted_locations() {
        let cloud = tenth_steps();
        let sorted = cloud.split(Axis::X, &[0.3, 0.7], true).unwrap();
        let unsorted = cloud.split(Axis::X, &[0.7, 0.3], true).unwrap();
        assert_eq!(sorted, unsorted);
    }

    #[test]
    fn split_reconstructs_original_point_set() {
        let cloud = tenth_steps();
        let segments = cloud.split(Axis::X, &[0.45, 0.15, 0.85], true).unwrap();
        let total: usize = segments.iter().map(PointCloud::len).sum();
        assert_eq!(total, cloud.len());

        let mut xs: Vec<f64> = segments.iter().flat_map(|s| s.x().to_vec()).collect();
        xs.sort_by(f64::total_cmp);
        assert_eq!(xs, cloud.x());
    }

    #[test]
    fn split_duplicate_locations_yield_empty_segment() {
        let cloud = tenth_steps();
        let segments = cloud.split(Axis::X, &[0.5, 0.5], true).unwrap();
        assert_eq!(segments.len(), 3);
        assert!(segments[1].is_empty());
        assert_eq!(segments[0].len() + segments[2].len(), 10);
    }

    #[test]
    fn split_out_of_range_locations_yield_empty_boundary_segments() {
        let cloud = tenth_steps();
        let segments = cloud.split(Axis::X, &[-1.0, 2.0], true).unwrap();
        assert!(segments[0].is_empty());
        assert_eq!(segments[1].len(), 10);
        assert!(segments[2].is_empty());
    }

    #[test]
    fn split_along_other_axes() {
        let cloud = PointCloud::new(
            vec![0.0, 0.0, 0.0],
            vec![1.0, 2.0, 3.0],
            vec![0.0, 0.0, 0.0],
        )
        .unwrap();
        let segments = cloud.split(Axis::Y, &[2.0], true).unwrap();
        assert_eq!(segments[0].y(), &[1.0]);
        assert_eq!(segments[1].y(), &[2.0, 3.0]);
    }

    #[test]
    fn merge_concatenates_in_input_order() {
        let a = PointCloud::new(vec![0.0, 1.0], vec![0.0, 0.0], vec![0.0, 0.0]).unwrap();
        let b = PointCloud::new(vec![2.0], vec![1.0], vec![1.0]).unwrap();
        let merged = merge(&[a.clone(), b.clone()]);
        assert_eq!(merged.len(), a.len() + b.len());
        assert_eq!(merged.x(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn merged_bounds_equal_merged_input_bounds() {
        let a = PointCloud::new(vec![0.0, 1.0], vec![0.0, 2.0], vec![0.0, 1.0]).unwrap();
        let b = PointCloud::new(vec![-1.0], vec![5.0], vec![0.5]).unwrap();
        let merged = merge(&[a.clone(), b.clone()]);
        let expected =
            Bounds::merge_all([&a.bounds().unwrap(), &b.bounds().unwrap()]).unwrap();
        assert_eq!(merged.bounds().unwrap(), expected);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert!(merge(&[]).is_empty());
    }
}
