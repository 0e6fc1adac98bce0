//! Error types for the seeker crate.

use thiserror::Error;

/// Errors raised while building or evaluating queries.
///
/// Missing fields, empty collections, out-of-range pages and a full
/// selection are all ordinary outcomes and never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The query cannot be evaluated (e.g. a page size of zero).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A textual argument could not be parsed into a query component.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, QueryError>;
