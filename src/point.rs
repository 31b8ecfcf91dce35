//! Fixed-dimension points with a deterministic total order.

use std::cmp::Ordering;

use geo_traits::{CoordTrait, Dimensions};

use crate::error::{KdMapError, Result};
use crate::r#type::IndexableNum;

/// An immutable point with `D` coordinates.
///
/// Points are ordered lexicographically across their coordinates. This order has no spatial
/// meaning; it exists so that equally distant results are resolved the same way regardless of how
/// a tree was built.
///
/// The order treats coordinates that cannot be compared as equal. Non-finite coordinates are
/// rejected before a point enters an index or a query, so this never applies to indexed data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<N: IndexableNum, const D: usize>([N; D]);

impl<N: IndexableNum, const D: usize> Point<N, D> {
    /// Create a new point from its coordinates.
    pub const fn new(coords: [N; D]) -> Self {
        Self(coords)
    }

    /// The coordinates of this point.
    #[inline]
    pub fn coords(&self) -> &[N; D] {
        &self.0
    }

    /// The coordinate along axis `dim`.
    ///
    /// Panics if `dim >= D`.
    #[inline]
    pub fn coord(&self, dim: usize) -> N {
        self.0[dim]
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn sq_dist(&self, other: &Self) -> N::Distance {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(num_traits::zero(), |acc, (a, b)| acc + a.sq_diff(*b))
    }

    /// Order two points by their coordinate along `dim`, breaking ties by the full point order.
    #[inline]
    pub(crate) fn cmp_in_dim(&self, other: &Self, dim: usize) -> Ordering {
        coord_cmp(self.0[dim], other.0[dim]).then_with(|| self.cmp(other))
    }

    /// Check that every coordinate is finite.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.0.iter().all(|c| c.is_valid()) {
            Ok(())
        } else {
            Err(KdMapError::InvalidCoordinate(format!("{:?}", self.0)))
        }
    }
}

impl<N: IndexableNum, const D: usize> From<[N; D]> for Point<N, D> {
    fn from(coords: [N; D]) -> Self {
        Self(coords)
    }
}

impl<N: IndexableNum, const D: usize> Eq for Point<N, D> {}

impl<N: IndexableNum, const D: usize> Ord for Point<N, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| coord_cmp(*a, *b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl<N: IndexableNum, const D: usize> PartialOrd for Point<N, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[inline]
fn coord_cmp<N: IndexableNum>(a: N, b: N) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl<N: IndexableNum> Point<N, 2> {
    /// Create a 2D point from any [`CoordTrait`], ignoring any further dimensions.
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        Self([coord.x(), coord.y()])
    }
}

impl<N: IndexableNum> Point<N, 3> {
    /// Create a 3D point from a [`CoordTrait`] with at least three dimensions.
    pub fn try_from_coord(coord: &impl CoordTrait<T = N>) -> Result<Self> {
        match coord.nth(2) {
            Some(z) => Ok(Self([coord.x(), coord.y(), z])),
            None => Err(KdMapError::DimensionMismatch {
                expected: 3,
                actual: coord.dim().size(),
            }),
        }
    }
}

impl<N: IndexableNum> CoordTrait for Point<N, 2> {
    type T = N;

    fn dim(&self) -> Dimensions {
        Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.0[0]
    }

    fn y(&self) -> Self::T {
        self.0[1]
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 | 1 => self.0[n],
            _ => panic!("Invalid index of coord"),
        }
    }
}

impl<N: IndexableNum> CoordTrait for Point<N, 3> {
    type T = N;

    fn dim(&self) -> Dimensions {
        Dimensions::Xyz
    }

    fn x(&self) -> Self::T {
        self.0[0]
    }

    fn y(&self) -> Self::T {
        self.0[1]
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0..=2 => self.0[n],
            _ => panic!("Invalid index of coord"),
        }
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use geo_traits::CoordTrait;

    use super::Point;
    use crate::KdMapError;

    #[test]
    fn orders_lexicographically() {
        let a = Point::new([1, 5, 0]);
        let b = Point::new([1, 6, -9]);
        let c = Point::new([2, 0, 0]);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.cmp(&a), Ordering::Equal);

        let mut points = vec![c, a, b];
        points.sort();
        assert_eq!(points, vec![a, b, c]);
    }

    #[test]
    fn dimension_order_breaks_ties_by_point() {
        let a = Point::new([3, 1]);
        let b = Point::new([3, 0]);
        assert_eq!(a.cmp_in_dim(&b, 0), Ordering::Greater);
        assert_eq!(a.cmp_in_dim(&b, 1), Ordering::Greater);
        assert_eq!(b.cmp_in_dim(&Point::new([4, -1]), 0), Ordering::Less);
    }

    #[test]
    fn squared_distance() {
        let a = Point::new([5u8, 5, 5]);
        assert_eq!(a.sq_dist(&Point::new([5, 5, 4])), 1);
        assert_eq!(a.sq_dist(&Point::new([0, 0, 0])), 75);
        assert_eq!(Point::new([0u8; 3]).sq_dist(&Point::new([255; 3])), 3 * 65025);

        let f = Point::new([0.5f64, -1.0]);
        assert_eq!(f.sq_dist(&Point::new([1.5, 1.0])), 5.0);
    }

    #[test]
    fn squared_distance_at_type_limits() {
        let span = u32::MAX as u128 * u32::MAX as u128;
        let far = Point::new([u32::MAX; 3]);
        assert_eq!(Point::new([0u32; 3]).sq_dist(&far), 3 * span);
        assert_eq!(Point::new([0u32, 0]).sq_dist(&Point::new([u32::MAX, u32::MAX])), 2 * span);

        let low = Point::new([i32::MIN; 3]);
        let high = Point::new([i32::MAX; 3]);
        assert_eq!(low.sq_dist(&high), 3 * span as i128);
        assert_eq!(high.sq_dist(&low), low.sq_dist(&high));
        assert_eq!(low.sq_dist(&low), 0);
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(Point::new([1.0f32, 2.0]).validate().is_ok());
        assert!(matches!(
            Point::new([1.0f64, f64::NAN]).validate(),
            Err(KdMapError::InvalidCoordinate(_))
        ));
        assert!(Point::new([f64::NEG_INFINITY]).validate().is_err());
    }

    #[test]
    fn coord_trait_interop() {
        let p2 = Point::new([1.0f64, 2.0]);
        assert_eq!(p2.x_y(), (1.0, 2.0));
        assert_eq!(Point::<f64, 2>::from_coord(&p2), p2);

        let p3 = Point::new([1, 2, 3]);
        assert_eq!(p3.nth(2), Some(3));
        assert_eq!(p3.nth(3), None);
        assert_eq!(Point::<i32, 3>::try_from_coord(&p3), Ok(p3));
        assert_eq!(
            Point::<f64, 3>::try_from_coord(&p2),
            Err(KdMapError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }
}
