//! Error taxonomy for gateway operations.

use super::row::RowDecodeError;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors returned by data gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The backend's zero-rows sentinel for single-row lookups.
    ///
    /// This is a normal branch outcome ("is this row present?"), not a
    /// failure, and callers must never conflate it with the other variants.
    #[error("no rows matched the query")]
    NoRows,

    /// The backend rejected the request.
    #[error("backend error {code}: {message}")]
    Backend {
        /// Backend-specific error code.
        code: String,
        /// Human-readable backend message.
        message: String,
    },

    /// Connectivity or infrastructure failure between client and backend.
    #[error("gateway transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport-level error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Creates a backend rejection with the given code and message.
    #[must_use]
    pub fn backend(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns `true` when this is the zero-rows sentinel.
    #[must_use]
    pub const fn is_no_rows(&self) -> bool {
        matches!(self, Self::NoRows)
    }
}

/// A read through the gateway failed.
///
/// Loads keep previously fetched state untouched when they fail; the caller
/// surfaces the message and re-issues the load to recover.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The gateway query itself failed.
    #[error("fetching rows failed: {0}")]
    Gateway(#[from] GatewayError),

    /// A fetched row could not be read into its domain type.
    #[error("a fetched row could not be read: {0}")]
    MalformedRow(#[from] RowDecodeError),
}
