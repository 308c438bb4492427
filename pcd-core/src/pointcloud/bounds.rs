use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One side of an axis-aligned box. `Unbounded` places no constraint on
/// that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    Value(f64),
    Unbounded,
}

impl Bound {
    /// Numeric form of a lower bound. Unbounded sides act as -inf.
    pub fn as_lower(self) -> f64 {
        match self {
            Bound::Value(v) => v,
            Bound::Unbounded => f64::NEG_INFINITY,
        }
    }

    /// Numeric form of an upper bound. Unbounded sides act as +inf.
    pub fn as_upper(self) -> f64 {
        match self {
            Bound::Value(v) => v,
            Bound::Unbounded => f64::INFINITY,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Bound::Value(v) => Some(v),
            Bound::Unbounded => None,
        }
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Bound::Value(value)
    }
}

impl From<Option<f64>> for Bound {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Bound::Value(v),
            None => Bound::Unbounded,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Value(v) => write!(f, "{}", v),
            Bound::Unbounded => write!(f, "unbounded"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            other => Err(format!("unknown axis: {}", other)),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Axis-aligned box with six independently optional sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub minx: Bound,
    pub miny: Bound,
    pub minz: Bound,
    pub maxx: Bound,
    pub maxy: Bound,
    pub maxz: Bound,
}

impl Bounds {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        minx: impl Into<Bound>,
        miny: impl Into<Bound>,
        minz: impl Into<Bound>,
        maxx: impl Into<Bound>,
        maxy: impl Into<Bound>,
        maxz: impl Into<Bound>,
    ) -> Self {
        Self {
            minx: minx.into(),
            miny: miny.into(),
            minz: minz.into(),
            maxx: maxx.into(),
            maxy: maxy.into(),
            maxz: maxz.into(),
        }
    }

    /// Box with no constraint on any side.
    pub fn unbounded() -> Self {
        Self::new(None, None, None, None, None, None)
    }

    pub fn from_min_max(min: [f64; 3], max: [f64; 3]) -> Self {
        Self::new(min[0], min[1], min[2], max[0], max[1], max[2])
    }

    pub fn min(&self, axis: Axis) -> Bound {
        match axis {
            Axis::X => self.minx,
            Axis::Y => self.miny,
            Axis::Z => self.minz,
        }
    }

    pub fn max(&self, axis: Axis) -> Bound {
        match axis {
            Axis::X => self.maxx,
            Axis::Y => self.maxy,
            Axis::Z => self.maxz,
        }
    }

    pub fn with_min(mut self, axis: Axis, bound: Bound) -> Self {
        match axis {
            Axis::X => self.minx = bound,
            Axis::Y => self.miny = bound,
            Axis::Z => self.minz = bound,
        }
        self
    }

    pub fn with_max(mut self, axis: Axis, bound: Bound) -> Self {
        match axis {
            Axis::X => self.maxx = bound,
            Axis::Y => self.maxy = bound,
            Axis::Z => self.maxz = bound,
        }
        self
    }

    /// Numeric (min, max) triples with unbounded sides coerced to +-inf.
    pub fn to_min_max(&self) -> ([f64; 3], [f64; 3]) {
        (
            [
                self.minx.as_lower(),
                self.miny.as_lower(),
                self.minz.as_lower(),
            ],
            [
                self.maxx.as_upper(),
                self.maxy.as_upper(),
                self.maxz.as_upper(),
            ],
        )
    }

    /// Converts numeric triples back to tagged form, mapping infinite
    /// sides to `Unbounded`.
    fn from_numeric(min: [f64; 3], max: [f64; 3]) -> Self {
        let side = |v: f64| {
            if v.is_infinite() {
                Bound::Unbounded
            } else {
                Bound::Value(v)
            }
        };
        Self {
            minx: side(min[0]),
            miny: side(min[1]),
            minz: side(min[2]),
            maxx: side(max[0]),
            maxy: side(max[1]),
            maxz: side(max[2]),
        }
    }

    /// Overall box covering all of `bounds`: per-side min/max reduction
    /// after coercing unbounded sides to the matching infinity.
    ///
    /// Returns `None` for an empty input.
    pub fn merge_all<'a, I>(bounds: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a Bounds>,
    {
        let mut iter = bounds.into_iter();
        let (mut min, mut max) = iter.next()?.to_min_max();
        for b in iter {
            let (bmin, bmax) = b.to_min_max();
            for i in 0..3 {
                min[i] = min[i].min(bmin[i]);
                max[i] = max[i].max(bmax[i]);
            }
        }
        Some(Bounds::from_numeric(min, max))
    }

    /// True if the boxes overlap on all three axes. Each axis uses the
    /// half-open test: touching intervals do not intersect. Unbounded
    /// sides always overlap.
    pub fn intersects(&self, other: &Bounds) -> bool {
        let (amin, amax) = self.to_min_max();
        let (bmin, bmax) = other.to_min_max();
        (0..3).all(|i| !(bmax[i] <= amin[i] || bmin[i] >= amax[i]))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "minx={}, miny={}, minz={}, maxx={}, maxy={}, maxz={}",
            self.minx, self.miny, self.minz, self.maxx, self.maxy, self.maxz
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Bounds {
        Bounds::from_min_max([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    #[test]
    fn bound_conversions() {
        assert_eq!(Bound::from(2.5), Bound::Value(2.5));
        assert_eq!(Bound::from(Some(2.5)), Bound::Value(2.5));
        assert_eq!(Bound::from(None), Bound::Unbounded);
        assert_eq!(Bound::Unbounded.as_lower(), f64::NEG_INFINITY);
        assert_eq!(Bound::Unbounded.as_upper(), f64::INFINITY);
        assert_eq!(Bound::Value(3.0).as_lower(), 3.0);
    }

    #[test]
    fn overlapping_boxes_intersect() {
        let a = unit_box();
        let b = Bounds::from_min_max([0.5, 0.5, 0.5], [1.5, 1.5, 1.5]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = unit_box();
        let b = Bounds::from_min_max([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn disjoint_on_one_axis_does_not_intersect() {
        let a = unit_box();
        // Overlaps in x and y but not z.
        let b = Bounds::from_min_max([0.0, 0.0, 5.0], [1.0, 1.0, 6.0]);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn unbounded_sides_always_overlap() {
        let a = Bounds::unbounded();
        let b = Bounds::from_min_max([100.0, 100.0, 100.0], [101.0, 101.0, 101.0]);
        assert!(a.intersects(&b));

        let half_open = Bounds::new(None, None, None, 0.5, None, None);
        assert!(half_open.intersects(&unit_box()));
    }

    #[test]
    fn merge_all_takes_extremes() {
        let a = unit_box();
        let b = Bounds::from_min_max([-1.0, 0.5, 0.0], [0.5, 2.0, 3.0]);
        let merged = Bounds::merge_all([&a, &b]).unwrap();
        assert_eq!(
            merged,
            Bounds::from_min_max([-1.0, 0.0, 0.0], [1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn merge_all_single_box_is_identity() {
        let a = unit_box();
        assert_eq!(Bounds::merge_all([&a]).unwrap(), a);
    }

    #[test]
    fn merge_all_empty_input_is_none() {
        let none: [&Bounds; 0] = [];
        assert!(Bounds::merge_all(none).is_none());
    }

    #[test]
    fn merge_all_preserves_unbounded_sides() {
        let a = Bounds::new(None, 0.0, 0.0, 1.0, 1.0, 1.0);
        let b = unit_box();
        let merged = Bounds::merge_all([&a, &b]).unwrap();
        assert_eq!(merged.minx, Bound::Unbounded);
        assert_eq!(merged.maxx, Bound::Value(1.0));
    }

    #[test]
    fn axis_parsing() {
        assert_eq!("x".parse::<Axis>().unwrap(), Axis::X);
        assert_eq!("Z".parse::<Axis>().unwrap(), Axis::Z);
        assert!("w".parse::<Axis>().is_err());
    }
}
