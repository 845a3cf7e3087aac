use thiserror::Error;

/// Errors returned by fallible [`IntervalTree`] operations.
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A null interval (`begin >= end`) was handed to an entry point that
    /// would have stored it.
    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    /// The interval to remove is not stored in the tree.
    #[error("interval not found: {0}")]
    NotFound(String),

    /// A structural invariant does not hold; describes the first broken
    /// one found.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
