//! Error types for SimScope core.

use std::{error::Error, fmt};

/// Error type for SimScope aggregation operations.
///
/// Every variant is raised at construction or aggregation time; a caller
/// either receives a fully valid value or one of these failures.
#[derive(Debug, Clone, PartialEq)]
pub enum SimscopeError {
    /// A similarity score outside `[0, 1]`, or a submission compared to itself.
    InvalidSimilarity {
        /// First submission id of the offending comparison.
        first: String,
        /// Second submission id of the offending comparison.
        second: String,
        /// The rejected similarity score.
        similarity: f64,
    },
    /// The unordered submission pair was already recorded for this metric.
    DuplicatePair {
        /// First submission id in canonical order.
        first: String,
        /// Second submission id in canonical order.
        second: String,
    },
    /// A clustering threshold outside `[0, 1]`.
    InvalidThreshold(f64),
    /// Aggregation was requested with no metrics at all.
    EmptyMetricSet,
    /// A submission id referenced by a comparison has no entry in the
    /// comparison-file lookup, in either pair order.
    UnresolvedSubmissionId(String),
}

impl fmt::Display for SimscopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSimilarity {
                first,
                second,
                similarity,
            } => write!(
                f,
                "invalid similarity {similarity} for pair {first}/{second}"
            ),
            Self::DuplicatePair { first, second } => {
                write!(f, "duplicate comparison for pair {first}/{second}")
            }
            Self::InvalidThreshold(threshold) => {
                write!(f, "invalid cluster threshold {threshold}")
            }
            Self::EmptyMetricSet => write!(f, "no metrics supplied for aggregation"),
            Self::UnresolvedSubmissionId(id) => {
                write!(f, "submission id {id} has no comparison file entry")
            }
        }
    }
}

impl Error for SimscopeError {}

/// Convenience result type for SimScope core.
pub type Result<T> = std::result::Result<T, SimscopeError>;
