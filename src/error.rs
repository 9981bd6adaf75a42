//! Error types and handling for query streams
//!
//! Every failure a stream can report is one of the kinds in [`QueryError`].
//! Errors are returned to the caller of the operation that detected them;
//! nothing is retried and nothing is swallowed, except by the `*_or_default`
//! terminals which substitute a fallback for an empty sequence.

/// Main error type for query operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A negative count was passed to `take` or `skip`
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `first`, `last`, `single` (or an aggregate needing one element) ran on an empty stream
    #[error("sequence contains no elements")]
    EmptySequence,

    /// `single` found more than one element
    #[error("sequence contains more than one element")]
    MultipleElementsFound,

    /// A stream was requested over an absent source
    #[error("cannot create a stream over an absent source")]
    NullSource,
}

impl QueryError {
    pub(crate) fn negative_count(count: isize) -> Self {
        QueryError::InvalidArgument(format!("count must be non-negative, got {}", count))
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
