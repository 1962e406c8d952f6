use thiserror::Error;

/// Errors returned by the clustering routines in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input point set is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is outside `(1, n)`.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Vector lengths or matrix shapes disagree.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// A point has zero total similarity to every other point, so the
    /// normalized affinity is undefined.
    #[error("singular degree: point {index} has zero total similarity")]
    SingularDegree {
        /// Row index of the isolated point.
        index: usize,
    },

    /// Mean of an empty set of vectors.
    #[error("empty cluster")]
    EmptyCluster,
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
