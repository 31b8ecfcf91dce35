//! Map query points to the payload of their nearest labeled point.
//!
//! A [`Mapper`] is the piece that turns, for example, the average color of an image region into
//! the tile whose average color is closest to it.

use std::collections::BTreeMap;

use log::{debug, warn};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::{KdMapError, Result};
use crate::kdtree::{KDTree, KDTreeBuilder, KDTreeIndex};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A KDTree over labeled points together with the payload of each point.
///
/// ```
/// use kdmap::{Mapper, Point};
///
/// let palette = Mapper::new([
///     (Point::new([0u8, 0, 0]), "black"),
///     (Point::new([255u8, 255, 255]), "white"),
/// ])
/// .unwrap();
/// assert_eq!(palette.get(&Point::new([10, 10, 10])).unwrap(), &"black");
/// ```
///
/// Payloads are keyed by point value. If two labeled points have identical coordinates, the
/// later payload replaces the earlier one.
#[derive(Debug, Clone)]
pub struct Mapper<N: IndexableNum, const D: usize, P> {
    tree: KDTree<N, D>,
    payloads: BTreeMap<Point<N, D>, P>,
}

impl<N: IndexableNum, const D: usize, P> Mapper<N, D, P> {
    /// Build a mapper from `(point, payload)` pairs.
    ///
    /// Fails if any point has a NaN or infinite coordinate.
    pub fn new<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Point<N, D>, P)>,
    {
        let items: Vec<(Point<N, D>, P)> = items.into_iter().collect();
        let mut builder = KDTreeBuilder::new(items.len());
        let mut payloads = BTreeMap::new();

        for (point, payload) in items {
            builder.add(point)?;
            if payloads.insert(point, payload).is_some() {
                warn!("duplicate labeled point {:?} replaces an earlier payload", point);
            }
        }

        let tree = builder.finish();
        debug!(
            "mapper holds {} points with {} distinct payloads",
            tree.num_items(),
            payloads.len()
        );
        Ok(Self { tree, payloads })
    }

    /// Assemble a mapper from an existing tree and payload dictionary.
    ///
    /// Every point of `tree` should have an entry in `payloads`; queries whose nearest point is
    /// missing fail with [`KdMapError::MissingPayload`].
    pub fn from_parts(tree: KDTree<N, D>, payloads: BTreeMap<Point<N, D>, P>) -> Self {
        Self { tree, payloads }
    }

    /// The underlying tree.
    pub fn tree(&self) -> &KDTree<N, D> {
        &self.tree
    }

    /// The number of labeled points.
    pub fn len(&self) -> usize {
        self.tree.num_items()
    }

    /// Whether this mapper has no labeled points.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The payload of the labeled point nearest to `query`.
    pub fn get(&self, query: &Point<N, D>) -> Result<&P> {
        let nearest = self.tree.nearest(query)?;
        self.payloads
            .get(&nearest)
            .ok_or_else(|| KdMapError::MissingPayload(format!("{:?}", nearest.coords())))
    }

    /// Look up the payload for each query point, lazily and in order.
    pub fn map<'a, I>(&'a self, queries: I) -> impl Iterator<Item = Result<&'a P>> + 'a
    where
        I: IntoIterator<Item = Point<N, D>>,
        I::IntoIter: 'a,
    {
        queries.into_iter().map(move |query| self.get(&query))
    }

    /// Resolve a `rows` by `columns` grid of samples into payloads.
    ///
    /// `sample` is called with `(row, column)` for every cell and returns the point to look up,
    /// e.g. the average color of that region of a source image. The result is row-major.
    pub fn map_grid<F>(&self, rows: usize, columns: usize, mut sample: F) -> Result<Vec<Vec<&P>>>
    where
        F: FnMut(usize, usize) -> Point<N, D>,
    {
        (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|column| self.get(&sample(row, column)))
                    .collect()
            })
            .collect()
    }

    /// Look up the payload for each query point, in parallel.
    #[cfg(feature = "rayon")]
    pub fn par_map(&self, queries: &[Point<N, D>]) -> Result<Vec<&P>>
    where
        P: Sync,
    {
        queries.par_iter().map(|query| self.get(query)).collect()
    }
}
