use std::cmp::{self, Ordering};

use log::debug;

use crate::error::Result;
use crate::kdtree::KDTree;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A builder to create a [`KDTree`].
pub struct KDTreeBuilder<N: IndexableNum, const D: usize> {
    points: Vec<Point<N, D>>,
    num_items: usize,
}

impl<N: IndexableNum, const D: usize> KDTreeBuilder<N, D> {
    /// Create a new builder with the provided number of items.
    pub fn new(num_items: usize) -> Self {
        assert!(D > 0, "Points must have at least one dimension.");

        Self {
            points: Vec::with_capacity(num_items),
            num_items,
        }
    }

    /// Add a point to the index, returning its insertion index.
    ///
    /// Fails if any coordinate is NaN or infinite.
    pub fn add(&mut self, point: impl Into<Point<N, D>>) -> Result<usize> {
        let point = point.into();
        point.validate()?;

        let index = self.points.len();
        self.points.push(point);
        Ok(index)
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(self) -> KDTree<N, D> {
        assert_eq!(
            self.points.len(),
            self.num_items,
            "Added {} items when expected {}.",
            self.points.len(),
            self.num_items
        );

        let mut points = self.points;
        let num_items = points.len();
        let mut ids: Vec<usize> = (0..num_items).collect();
        let mut left_child = vec![num_items; num_items];
        let mut right_child = vec![num_items; num_items];

        let mut nodes = Nodes {
            points: &mut points,
            ids: &mut ids,
            left_child: &mut left_child,
            right_child: &mut right_child,
        };
        let root = sort(&mut nodes, 0, num_items, 0);
        debug!(
            "built {}-dimensional kd-tree over {} points (root {})",
            D, num_items, root
        );

        KDTree {
            points,
            ids,
            left_child,
            right_child,
        }
    }
}

/// Mutable borrow of the parallel arrays that make up a tree while it is being sorted.
struct Nodes<'a, N: IndexableNum, const D: usize> {
    points: &'a mut [Point<N, D>],
    ids: &'a mut [usize],
    left_child: &'a mut [usize],
    right_child: &'a mut [usize],
}

impl<N: IndexableNum, const D: usize> Nodes<'_, N, D> {
    #[inline]
    fn swap_item(&mut self, i: usize, j: usize) {
        self.points.swap(i, j);
        self.ids.swap(i, j);
    }

    #[inline]
    fn cmp_to(&self, i: usize, pivot: &Point<N, D>, dim: usize) -> Ordering {
        self.points[i].cmp_in_dim(pivot, dim)
    }
}

/// kd-sort the half-open range `[left, right)` splitting on `dim`, returning the position of the
/// subtree's root, or the sentinel (the total item count) when the range is empty.
fn sort<N: IndexableNum, const D: usize>(
    nodes: &mut Nodes<'_, N, D>,
    left: usize,
    right: usize,
    dim: usize,
) -> usize {
    if left >= right {
        return nodes.points.len();
    }

    // middle index
    let m = (left + right - 1) >> 1;

    // sort points around the middle index so that smaller points along `dim` lie before it and
    // larger ones after it
    select(nodes, m, left, right - 1, dim);

    // recursively kd-sort first half and second half on the next axis
    let next_dim = (dim + 1) % D;
    let left_root = sort(nodes, left, m, next_dim);
    let right_root = sort(nodes, m + 1, right, next_dim);
    nodes.left_child[m] = left_root;
    nodes.right_child[m] = right_root;
    m
}

/// Custom Floyd-Rivest selection algorithm: reorder the inclusive range `[left, right]` so that
/// items `[left..k-1]` are smaller than the k-th item along `dim` and items `[k+1..right]` larger.
fn select<N: IndexableNum, const D: usize>(
    nodes: &mut Nodes<'_, N, D>,
    k: usize,
    mut left: usize,
    mut right: usize,
    dim: usize,
) {
    debug_assert!(left <= k && k <= right, "selection index outside of range");

    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = f64::ln(n);
            let s = 0.5 * f64::exp((2.0 * z) / 3.0);
            let sd = 0.5
                * f64::sqrt((z * s * (n - s)) / n)
                * (if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 });
            let new_left = cmp::max(left, f64::floor(k as f64 - (m * s) / n + sd) as usize);
            let new_right = cmp::min(
                right,
                f64::floor(k as f64 + ((n - m) * s) / n + sd) as usize,
            );
            select(nodes, k, new_left, new_right, dim);
        }

        let t = nodes.points[k];
        let mut i = left;
        let mut j = right;

        nodes.swap_item(left, k);
        if nodes.cmp_to(right, &t, dim) == Ordering::Greater {
            nodes.swap_item(left, right);
        }

        while i < j {
            nodes.swap_item(i, j);
            i += 1;
            j -= 1;
            while nodes.cmp_to(i, &t, dim) == Ordering::Less {
                i += 1;
            }
            while nodes.cmp_to(j, &t, dim) == Ordering::Greater {
                j -= 1;
            }
        }

        if nodes.cmp_to(left, &t, dim) == Ordering::Equal {
            nodes.swap_item(left, j);
        } else {
            j += 1;
            nodes.swap_item(j, right);
        }

        match j.cmp(&k) {
            Ordering::Less => left = j + 1,
            Ordering::Greater => right = j - 1,
            Ordering::Equal => return,
        }
    }
}
