use std::cmp::Ordering;

use tinyvec::TinyVec;

use crate::error::{KdMapError, Result};
use crate::kdtree::{KDTree, KDTreeRef, Node};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<N: IndexableNum, const D: usize>: Sized {
    /// The kd-sorted points of this tree
    fn points(&self) -> &[Point<N, D>];

    /// The insertion index of each point in [`points`][KDTreeIndex::points]
    fn ids(&self) -> &[usize];

    /// For each position, the position of its left subtree root or the sentinel
    fn left_children(&self) -> &[usize];

    /// For each position, the position of its right subtree root or the sentinel
    fn right_children(&self) -> &[usize];

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.points().len()
    }

    /// Whether this KDTree holds no items
    fn is_empty(&self) -> bool {
        self.num_items() == 0
    }

    /// The child link value marking an absent subtree.
    fn sentinel(&self) -> usize {
        self.num_items()
    }

    /// The position of the root node, or `None` for an empty tree.
    fn root_index(&self) -> Option<usize> {
        self.num_items().checked_sub(1).map(|last| last >> 1)
    }

    /// Find the indexed point closest to `query`.
    ///
    /// Distance is squared Euclidean distance. When several points are equally close, the
    /// smallest of them in [`Point`] order is returned, however the tree was built.
    ///
    /// ```
    /// use kdmap::kdtree::{KDTree, KDTreeIndex};
    /// use kdmap::Point;
    ///
    /// let tree = KDTree::<i32, 3>::try_from_points([[0, 0, 0], [10, 10, 10], [5, 5, 4]]).unwrap();
    /// let nearest = tree.nearest(&Point::new([5, 5, 5])).unwrap();
    /// assert_eq!(nearest, Point::new([5, 5, 4]));
    /// ```
    fn nearest(&self, query: &Point<N, D>) -> Result<Point<N, D>> {
        let (pos, _) = nearest_position(self, query)?;
        Ok(self.points()[pos])
    }

    /// Find the indexed point closest to `query`, along with its squared distance.
    fn nearest_with_distance(&self, query: &Point<N, D>) -> Result<(Point<N, D>, N::Distance)> {
        let (pos, dist) = nearest_position(self, query)?;
        Ok((self.points()[pos], dist))
    }

    /// Find the insertion index of the indexed point closest to `query`.
    fn nearest_id(&self, query: &Point<N, D>) -> Result<usize> {
        let (pos, _) = nearest_position(self, query)?;
        Ok(self.ids()[pos])
    }

    /// Search the index for items within a given squared distance of `query`.
    ///
    /// Returns insertion indices of found items
    fn within(&self, query: &Point<N, D>, max_sq_dist: N::Distance) -> Result<Vec<usize>> {
        query.validate()?;

        let points = self.points();
        let ids = self.ids();
        let sentinel = self.sentinel();
        let mut result = vec![];

        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[(usize, usize); 32]> = TinyVec::new();
        if let Some(root) = self.root_index() {
            stack.push((root, 0));
        }

        while let Some((pos, dim)) = stack.pop() {
            let point = &points[pos];
            if point.sq_dist(query) <= max_sq_dist {
                result.push(ids[pos]);
            }

            // queue the halves that the query ball reaches
            let plane = point.coord(dim).sq_diff(query.coord(dim));
            let next_dim = (dim + 1) % D;
            let left = self.left_children()[pos];
            let right = self.right_children()[pos];
            let query_is_left = query.coord(dim) < point.coord(dim);
            if left != sentinel && (query_is_left || plane <= max_sq_dist) {
                stack.push((left, next_dim));
            }
            if right != sentinel && (!query_is_left || plane <= max_sq_dist) {
                stack.push((right, next_dim));
            }
        }

        Ok(result)
    }

    /// Search the index for items inside the axis-aligned box spanned by `min` and `max`,
    /// inclusive on every axis.
    ///
    /// Returns insertion indices of found items
    fn range(&self, min: &Point<N, D>, max: &Point<N, D>) -> Vec<usize> {
        let points = self.points();
        let ids = self.ids();
        let sentinel = self.sentinel();
        let mut result = vec![];

        let mut stack: TinyVec<[(usize, usize); 32]> = TinyVec::new();
        if let Some(root) = self.root_index() {
            stack.push((root, 0));
        }

        while let Some((pos, dim)) = stack.pop() {
            let point = &points[pos];
            let inside = (0..D)
                .all(|d| min.coord(d) <= point.coord(d) && point.coord(d) <= max.coord(d));
            if inside {
                result.push(ids[pos]);
            }

            let next_dim = (dim + 1) % D;
            let left = self.left_children()[pos];
            let right = self.right_children()[pos];
            if left != sentinel && min.coord(dim) <= point.coord(dim) {
                stack.push((left, next_dim));
            }
            if right != sentinel && max.coord(dim) >= point.coord(dim) {
                stack.push((right, next_dim));
            }
        }

        result
    }

    /// Access the root node of the KDTree for manual traversal, or `None` for an empty tree.
    fn root(&self) -> Option<Node<'_, N, D, Self>> {
        self.root_index().map(|pos| Node::new(self, pos, 0))
    }
}

/// Position and squared distance of the nearest point to `query`.
fn nearest_position<N: IndexableNum, const D: usize, T: KDTreeIndex<N, D>>(
    tree: &T,
    query: &Point<N, D>,
) -> Result<(usize, N::Distance)> {
    query.validate()?;
    let root = tree.root_index().ok_or(KdMapError::EmptyIndex)?;
    Ok(search(tree, root, 0, query))
}

/// Branch-and-bound search of the subtree rooted at `pos`, which splits on `dim`.
fn search<N: IndexableNum, const D: usize, T: KDTreeIndex<N, D>>(
    tree: &T,
    pos: usize,
    dim: usize,
    query: &Point<N, D>,
) -> (usize, N::Distance) {
    let points = tree.points();
    let sentinel = tree.sentinel();
    let point = &points[pos];
    let next_dim = (dim + 1) % D;

    let (near, far) = if query.coord(dim) < point.coord(dim) {
        (tree.left_children()[pos], tree.right_children()[pos])
    } else {
        (tree.right_children()[pos], tree.left_children()[pos])
    };

    let mut best = (pos, point.sq_dist(query));
    if near != sentinel {
        best = closer(points, best, search(tree, near, next_dim, query));
    }

    // The far side can only hold a closer point, or an equally close but smaller one, when the
    // splitting plane is no farther away than the current best.
    if far != sentinel && point.coord(dim).sq_diff(query.coord(dim)) <= best.1 {
        best = closer(points, best, search(tree, far, next_dim, query));
    }

    best
}

/// The better of two candidates: smaller squared distance, then smaller point.
#[inline]
fn closer<N: IndexableNum, const D: usize>(
    points: &[Point<N, D>],
    a: (usize, N::Distance),
    b: (usize, N::Distance),
) -> (usize, N::Distance) {
    match a.1.partial_cmp(&b.1) {
        Some(Ordering::Less) => a,
        Some(Ordering::Greater) => b,
        _ => {
            if points[b.0] < points[a.0] {
                b
            } else {
                a
            }
        }
    }
}

impl<N: IndexableNum, const D: usize> KDTreeIndex<N, D> for KDTree<N, D> {
    fn points(&self) -> &[Point<N, D>] {
        &self.points
    }

    fn ids(&self) -> &[usize] {
        &self.ids
    }

    fn left_children(&self) -> &[usize] {
        &self.left_child
    }

    fn right_children(&self) -> &[usize] {
        &self.right_child
    }
}

impl<N: IndexableNum, const D: usize> KDTreeIndex<N, D> for KDTreeRef<'_, N, D> {
    fn points(&self) -> &[Point<N, D>] {
        self.points
    }

    fn ids(&self) -> &[usize] {
        self.ids
    }

    fn left_children(&self) -> &[usize] {
        self.left_child
    }

    fn right_children(&self) -> &[usize] {
        self.right_child
    }
}
