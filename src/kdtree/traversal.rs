//! Utilities to traverse the KDTree structure.

use std::marker::PhantomData;

use crate::kdtree::KDTreeIndex;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A node in the KDTree.
#[derive(Debug, Clone)]
pub struct Node<'a, N: IndexableNum, const D: usize, T: KDTreeIndex<N, D>> {
    /// The tree that this node is a reference onto
    tree: &'a T,

    /// Position of this node in the kd-sorted arrays
    pos: usize,

    /// The axis that the children of this node are split over
    dim: usize,

    phantom: PhantomData<N>,
}

impl<'a, N: IndexableNum, const D: usize, T: KDTreeIndex<N, D>> Node<'a, N, D, T> {
    pub(crate) fn new(tree: &'a T, pos: usize, dim: usize) -> Self {
        Self {
            tree,
            pos,
            dim,
            phantom: PhantomData,
        }
    }

    /// Note: this is the index into the points array, not the insertion index.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The original insertion index of this node's point.
    #[inline]
    pub fn id(&self) -> usize {
        self.tree.ids()[self.pos]
    }

    /// The point splitting this node.
    #[inline]
    pub fn point(&self) -> &'a Point<N, D> {
        &self.tree.points()[self.pos]
    }

    /// The axis this node's children are split over.
    #[inline]
    pub fn split_dim(&self) -> usize {
        self.dim
    }

    /// The subtree holding points no larger than this node's point along the split axis.
    pub fn left_child(&self) -> Option<Node<'a, N, D, T>> {
        self.child(self.tree.left_children()[self.pos])
    }

    /// The subtree holding points no smaller than this node's point along the split axis.
    pub fn right_child(&self) -> Option<Node<'a, N, D, T>> {
        self.child(self.tree.right_children()[self.pos])
    }

    fn child(&self, pos: usize) -> Option<Node<'a, N, D, T>> {
        (pos != self.tree.sentinel()).then(|| Node::new(self.tree, pos, (self.dim + 1) % D))
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        let sentinel = self.tree.sentinel();
        self.tree.left_children()[self.pos] == sentinel
            && self.tree.right_children()[self.pos] == sentinel
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}
