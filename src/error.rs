use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdMapError {
    /// A nearest-neighbor query was run against an index without any points.
    #[error("Cannot query an empty index.")]
    EmptyIndex,

    /// The nearest point has no entry in the mapper's payload dictionary.
    #[error("No payload stored for nearest point {0}.")]
    MissingPayload(String),

    /// A point has a coordinate that is NaN or infinite.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A coordinate of another dimension was supplied.
    #[error("Expected a coordinate with {expected} dimensions, got {actual}.")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The slices handed to a borrowed tree do not describe a valid tree.
    #[error("Invalid tree layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, KdMapError>;
