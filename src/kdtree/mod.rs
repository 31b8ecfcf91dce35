//! An implementation of an immutable, balanced K-D Tree for exact nearest-neighbor queries.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{KDTree, KDTreeRef};
pub use r#trait::KDTreeIndex;
pub use traversal::Node;
