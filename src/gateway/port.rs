//! Data gateway port consumed by every bounded context.

use super::error::{GatewayError, GatewayResult};
use super::filter::Filter;
use super::row::Row;
use crate::profile::domain::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public URL of an uploaded blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobUrl(String);

impl BlobUrl {
    /// Creates a blob URL from its string form.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BlobUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Row-level contract with the external data backend.
///
/// The backend also provides authentication and blob storage, so the port
/// exposes the signed-in user and blob uploads alongside filtered row CRUD.
/// Network calls through this trait are the only suspension points in the
/// services built on top of it.
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Returns every row of `table` matching `filter`.
    ///
    /// An empty result is an `Ok` value; see [`DataGateway::query_one`] for
    /// the single-row sentinel behaviour.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend rejects the query or the
    /// transport fails.
    async fn query_rows(&self, table: &str, filter: &Filter) -> GatewayResult<Vec<Row>>;

    /// Inserts rows into `table`, returning them as stored.
    ///
    /// Returned rows carry any identifiers the backend assigned.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend rejects the insert or the
    /// transport fails.
    async fn insert_rows(&self, table: &str, rows: Vec<Row>) -> GatewayResult<Vec<Row>>;

    /// Applies `patch` to every row of `table` matching `filter`, returning
    /// the updated rows.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend rejects the update or the
    /// transport fails.
    async fn update_rows(&self, table: &str, filter: &Filter, patch: Row)
    -> GatewayResult<Vec<Row>>;

    /// Deletes every row of `table` matching `filter`.
    ///
    /// Deleting zero rows is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend rejects the delete or the
    /// transport fails.
    async fn delete_rows(&self, table: &str, filter: &Filter) -> GatewayResult<()>;

    /// Returns the identifier of the signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the session lookup fails.
    async fn current_user(&self) -> GatewayResult<Option<UserId>>;

    /// Uploads a blob and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the upload is rejected or the transport
    /// fails.
    async fn upload_blob(&self, bucket: &str, path: &str, bytes: Vec<u8>)
    -> GatewayResult<BlobUrl>;

    /// Queries exactly one row, mapping an empty result to the
    /// [`GatewayError::NoRows`] sentinel.
    ///
    /// Existence probes branch on `NoRows` rather than treating it as a
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NoRows`] when no row matches, or any error of
    /// [`DataGateway::query_rows`].
    async fn query_one(&self, table: &str, filter: &Filter) -> GatewayResult<Row> {
        let rows = self.query_rows(table, filter).await?;
        rows.into_iter().next().ok_or(GatewayError::NoRows)
    }
}
