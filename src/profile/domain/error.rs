//! Error types for profile domain validation.

use thiserror::Error;

/// Errors returned while constructing profile domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The display name exceeds the storage limit.
    #[error("display name longer than {max} characters: {length}")]
    DisplayNameTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected name.
        length: usize,
    },
}
