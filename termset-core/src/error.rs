//! Error types for termset-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
///
/// Absence results (`remove` on a missing term, positional access past the
/// end) are ordinary `Option`/enum variants on the operations themselves,
/// not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A submitted value contained a leaf outside the admissible variant set
    #[error("Unsupported term type: {kind}")]
    UnsupportedType {
        /// Variant name of the offending leaf
        kind: &'static str,
    },

    /// A trusted bulk append was given a run at or above the bucket bound
    #[error("Bucket of {given} terms reaches the maximum bucket length {max}")]
    MaxBucketLenExceeded {
        /// Number of terms in the rejected run
        given: usize,
        /// Configured maximum bucket length
        max: usize,
    },
}

impl Error {
    /// Create an unsupported-type error for the given leaf variant
    pub fn unsupported(kind: &'static str) -> Self {
        Error::UnsupportedType { kind }
    }
}
