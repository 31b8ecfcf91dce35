#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
pub mod mapper;
pub mod point;
mod r#type;

pub use error::{KdMapError, Result};
pub use mapper::Mapper;
pub use point::Point;
pub use r#type::IndexableNum;

#[cfg(test)]
pub(crate) mod test;
