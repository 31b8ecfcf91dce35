use crate::error::{KdMapError, Result};
use crate::kdtree::KDTreeBuilder;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// An owned KDTree.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder].
///
/// The tree is stored as parallel arrays: the kd-sorted points, the insertion index of each
/// point, and for every position the positions of its left and right subtree roots. An absent
/// child is marked by the number of points in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: IndexableNum, const D: usize> {
    pub(crate) points: Vec<Point<N, D>>,
    pub(crate) ids: Vec<usize>,
    pub(crate) left_child: Vec<usize>,
    pub(crate) right_child: Vec<usize>,
}

impl<N: IndexableNum, const D: usize> KDTree<N, D> {
    /// Build a tree from every point in `points`, in iteration order.
    ///
    /// Fails if any coordinate is NaN or infinite.
    pub fn try_from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Point<N, D>>,
    {
        let points: Vec<Point<N, D>> = points.into_iter().map(Into::into).collect();
        let mut builder = KDTreeBuilder::new(points.len());
        for point in points {
            builder.add(point)?;
        }
        Ok(builder.finish())
    }

    /// Borrow this tree as a [`KDTreeRef`].
    pub fn as_ref(&self) -> KDTreeRef<'_, N, D> {
        KDTreeRef {
            points: &self.points,
            ids: &self.ids,
            left_child: &self.left_child,
            right_child: &self.right_child,
        }
    }
}

/// A reference onto external KDTree arrays.
///
/// Usually this will be created from a [`KDTree`] via its [`as_ref`][KDTree::as_ref]
/// method, but it can also be created from any existing slices that were laid out by a
/// [`KDTreeBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KDTreeRef<'a, N: IndexableNum, const D: usize> {
    pub(crate) points: &'a [Point<N, D>],
    pub(crate) ids: &'a [usize],
    pub(crate) left_child: &'a [usize],
    pub(crate) right_child: &'a [usize],
}

impl<'a, N: IndexableNum, const D: usize> KDTreeRef<'a, N, D> {
    /// Wrap existing tree arrays, checking that they are consistent.
    ///
    /// Every slice must have one entry per point, every child link must be either a valid
    /// position or the sentinel (the number of points), and `ids` must hold each insertion index
    /// exactly once. These checks cover structure only: the points are not checked to be
    /// kd-sorted along the links, and arrays that were not produced by [`KDTreeBuilder`] may give
    /// wrong nearest results.
    pub fn try_new(
        points: &'a [Point<N, D>],
        ids: &'a [usize],
        left_child: &'a [usize],
        right_child: &'a [usize],
    ) -> Result<Self> {
        let num_items = points.len();
        for (name, len) in [
            ("ids", ids.len()),
            ("left_child", left_child.len()),
            ("right_child", right_child.len()),
        ] {
            if len != num_items {
                return Err(KdMapError::InvalidLayout(format!(
                    "Expected {} entries in {}, got {}.",
                    num_items, name, len
                )));
            }
        }

        let mut seen = vec![false; num_items];
        for &id in ids {
            if id >= num_items {
                return Err(KdMapError::InvalidLayout(format!(
                    "Id {} out of bounds for {} items.",
                    id, num_items
                )));
            }
            if std::mem::replace(&mut seen[id], true) {
                return Err(KdMapError::InvalidLayout(format!("Id {} is repeated.", id)));
            }
        }

        if let Some(&child) = left_child
            .iter()
            .chain(right_child.iter())
            .find(|&&child| child > num_items)
        {
            return Err(KdMapError::InvalidLayout(format!(
                "Child link {} out of bounds for {} items.",
                child, num_items
            )));
        }

        // every position must be reached exactly once from the root
        if num_items > 0 {
            let mut visited = vec![false; num_items];
            let mut stack = vec![(num_items - 1) >> 1];
            while let Some(pos) = stack.pop() {
                if std::mem::replace(&mut visited[pos], true) {
                    return Err(KdMapError::InvalidLayout(format!(
                        "Position {} is linked more than once.",
                        pos
                    )));
                }
                for child in [left_child[pos], right_child[pos]] {
                    if child != num_items {
                        stack.push(child);
                    }
                }
            }
            if let Some(pos) = visited.iter().position(|seen| !seen) {
                return Err(KdMapError::InvalidLayout(format!(
                    "Position {} is not reachable from the root.",
                    pos
                )));
            }
        }

        for point in points {
            point.validate()?;
        }

        Ok(Self {
            points,
            ids,
            left_child,
            right_child,
        })
    }
}
