use thiserror::Error;

/// Errors returned by the clustering pipelines in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// No points were supplied.
    #[error("empty dataset")]
    EmptyDataset,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested rank (cluster count) is incompatible with the dataset.
    ///
    /// Valid ranks satisfy `1 <= k < n`.
    #[error("invalid rank: requested {requested}, but dataset has {n_items} items")]
    InvalidRank {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Points have inconsistent dimensionality, or two matrices do not fit together.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A vertex of the similarity graph has zero total affinity.
    #[error("degenerate vertex {index}: zero degree")]
    DegenerateVertex {
        /// Row index of the isolated point.
        index: usize,
    },

    /// Reading the input file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The input file is not valid delimited text.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A field of the input file is not a number.
    #[error(transparent)]
    ParseFloat(#[from] std::num::ParseFloatError),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
