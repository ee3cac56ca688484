//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The status code read from storage is not one of 1, 2, or 3.
    #[error("unknown status code: {0}")]
    UnknownStatusCode(i64),

    /// The priority read from storage is not `low`, `medium`, or `high`.
    #[error("unknown priority: {0}")]
    UnknownPriority(String),
}
