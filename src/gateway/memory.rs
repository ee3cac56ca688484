//! In-memory data gateway for tests.

use async_trait::async_trait;
use serde_json::{Number, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, RwLock};

use super::error::{GatewayError, GatewayResult};
use super::filter::Filter;
use super::port::{BlobUrl, DataGateway};
use super::row::Row;
use crate::profile::domain::UserId;

/// One call recorded by [`InMemoryGateway`].
///
/// The journal records attempts in order, including calls that failed
/// through injected errors, so tests can assert exactly which writes a
/// service issued and with what payload.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    /// A `query_rows` call.
    Query {
        /// Queried table.
        table: String,
        /// Filter the query carried.
        filter: Filter,
    },
    /// An `insert_rows` call.
    Insert {
        /// Target table.
        table: String,
        /// Rows as the caller supplied them, before id assignment.
        rows: Vec<Row>,
    },
    /// An `update_rows` call.
    Update {
        /// Target table.
        table: String,
        /// Filter selecting the rows to patch.
        filter: Filter,
        /// Columns the caller asked to change.
        patch: Row,
    },
    /// A `delete_rows` call.
    Delete {
        /// Target table.
        table: String,
        /// Filter selecting the rows to remove.
        filter: Filter,
    },
    /// An `upload_blob` call.
    Upload {
        /// Target bucket.
        bucket: String,
        /// Path within the bucket.
        path: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CallKind {
    Query,
    Insert,
    Update,
    Delete,
    Upload,
}

#[derive(Debug)]
struct GatewayState {
    tables: HashMap<String, Vec<Row>>,
    serial_tables: HashSet<String>,
    next_id: i64,
    journal: Vec<GatewayCall>,
    failures: HashMap<(CallKind, String), VecDeque<GatewayError>>,
    user: Option<UserId>,
    blobs: HashMap<String, Vec<u8>>,
}

impl Default for GatewayState {
    fn default() -> Self {
        Self {
            tables: HashMap::new(),
            serial_tables: HashSet::new(),
            next_id: 1,
            journal: Vec::new(),
            failures: HashMap::new(),
            user: None,
            blobs: HashMap::new(),
        }
    }
}

/// Thread-safe in-memory stand-in for the remote backend.
///
/// Tables are plain row lists. Tables registered through
/// [`InMemoryGateway::with_serial_ids`] get a backend-assigned integer `id`
/// on insert when the caller left it out, mirroring the serial keys of the
/// real store. Errors queued with the `fail_next_*` helpers are returned by
/// the next matching call, which lets tests drive rollback paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<RwLock<GatewayState>>,
}

impl InMemoryGateway {
    /// Creates an empty gateway with no signed-in user.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `table` as carrying backend-assigned integer ids.
    #[must_use]
    pub fn with_serial_ids(self, table: &str) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.serial_tables.insert(table.to_owned());
        }
        self
    }

    /// Signs a user in.
    pub fn sign_in(&self, user: UserId) {
        if let Ok(mut state) = self.state.write() {
            state.user = Some(user);
        }
    }

    /// Signs the current user out.
    pub fn sign_out(&self) {
        if let Ok(mut state) = self.state.write() {
            state.user = None;
        }
    }

    /// Appends rows to `table` without journaling them.
    ///
    /// Seeded rows keep their columns as given; no ids are assigned.
    pub fn seed_rows(&self, table: &str, rows: impl IntoIterator<Item = Row>) {
        if let Ok(mut state) = self.state.write() {
            state.tables.entry(table.to_owned()).or_default().extend(rows);
        }
    }

    /// Returns a snapshot of the rows currently stored in `table`.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.tables.get(table).cloned())
            .unwrap_or_default()
    }

    /// Returns the calls recorded so far, oldest first.
    #[must_use]
    pub fn journal(&self) -> Vec<GatewayCall> {
        self.state
            .read()
            .ok()
            .map(|state| state.journal.clone())
            .unwrap_or_default()
    }

    /// Discards the recorded calls.
    ///
    /// Handy after an arrange phase so assertions only see the act phase.
    pub fn clear_journal(&self) {
        if let Ok(mut state) = self.state.write() {
            state.journal.clear();
        }
    }

    /// Returns the bytes uploaded to `bucket` at `path`, if any.
    #[must_use]
    pub fn blob(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.blobs.get(&blob_key(bucket, path)).cloned())
    }

    /// Queues `error` for the next query against `table`.
    pub fn fail_next_query(&self, table: &str, error: GatewayError) {
        self.queue_failure(CallKind::Query, table, error);
    }

    /// Queues `error` for the next insert into `table`.
    pub fn fail_next_insert(&self, table: &str, error: GatewayError) {
        self.queue_failure(CallKind::Insert, table, error);
    }

    /// Queues `error` for the next update against `table`.
    pub fn fail_next_update(&self, table: &str, error: GatewayError) {
        self.queue_failure(CallKind::Update, table, error);
    }

    /// Queues `error` for the next delete against `table`.
    pub fn fail_next_delete(&self, table: &str, error: GatewayError) {
        self.queue_failure(CallKind::Delete, table, error);
    }

    /// Queues `error` for the next upload into `bucket`.
    pub fn fail_next_upload(&self, bucket: &str, error: GatewayError) {
        self.queue_failure(CallKind::Upload, bucket, error);
    }

    fn queue_failure(&self, kind: CallKind, table: &str, error: GatewayError) {
        if let Ok(mut state) = self.state.write() {
            state
                .failures
                .entry((kind, table.to_owned()))
                .or_default()
                .push_back(error);
        }
    }

    fn lock_write(&self) -> GatewayResult<std::sync::RwLockWriteGuard<'_, GatewayState>> {
        self.state
            .write()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
    }
}

fn blob_key(bucket: &str, path: &str) -> String {
    format!("{bucket}/{path}")
}

fn take_failure(state: &mut GatewayState, kind: CallKind, table: &str) -> Option<GatewayError> {
    let key = (kind, table.to_owned());
    let error = state.failures.get_mut(&key).and_then(VecDeque::pop_front);
    if state.failures.get(&key).is_some_and(VecDeque::is_empty) {
        state.failures.remove(&key);
    }
    error
}

#[async_trait]
impl DataGateway for InMemoryGateway {
    async fn query_rows(&self, table: &str, filter: &Filter) -> GatewayResult<Vec<Row>> {
        let mut state = self.lock_write()?;
        state.journal.push(GatewayCall::Query {
            table: table.to_owned(),
            filter: filter.clone(),
        });
        if let Some(error) = take_failure(&mut state, CallKind::Query, table) {
            return Err(error);
        }
        let rows = state
            .tables
            .get(table)
            .map(|rows| rows.iter().filter(|row| filter.matches(row)).cloned().collect())
            .unwrap_or_default();
        Ok(rows)
    }

    async fn insert_rows(&self, table: &str, rows: Vec<Row>) -> GatewayResult<Vec<Row>> {
        let mut state = self.lock_write()?;
        state.journal.push(GatewayCall::Insert {
            table: table.to_owned(),
            rows: rows.clone(),
        });
        if let Some(error) = take_failure(&mut state, CallKind::Insert, table) {
            return Err(error);
        }
        let serial = state.serial_tables.contains(table);
        let mut stored = Vec::with_capacity(rows.len());
        for mut row in rows {
            if serial && !row.contains("id") {
                let id = state.next_id;
                state.next_id += 1;
                row.set("id", Value::Number(Number::from(id)));
            }
            stored.push(row);
        }
        state
            .tables
            .entry(table.to_owned())
            .or_default()
            .extend(stored.clone());
        Ok(stored)
    }

    async fn update_rows(
        &self,
        table: &str,
        filter: &Filter,
        patch: Row,
    ) -> GatewayResult<Vec<Row>> {
        let mut state = self.lock_write()?;
        state.journal.push(GatewayCall::Update {
            table: table.to_owned(),
            filter: filter.clone(),
            patch: patch.clone(),
        });
        if let Some(error) = take_failure(&mut state, CallKind::Update, table) {
            return Err(error);
        }
        let mut updated = Vec::new();
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| filter.matches(row)) {
                for (column, value) in patch.columns() {
                    row.set(column, value.clone());
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete_rows(&self, table: &str, filter: &Filter) -> GatewayResult<()> {
        let mut state = self.lock_write()?;
        state.journal.push(GatewayCall::Delete {
            table: table.to_owned(),
            filter: filter.clone(),
        });
        if let Some(error) = take_failure(&mut state, CallKind::Delete, table) {
            return Err(error);
        }
        if let Some(rows) = state.tables.get_mut(table) {
            rows.retain(|row| !filter.matches(row));
        }
        Ok(())
    }

    async fn current_user(&self) -> GatewayResult<Option<UserId>> {
        let state = self
            .state
            .read()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.user.clone())
    }

    async fn upload_blob(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
    ) -> GatewayResult<BlobUrl> {
        let mut state = self.lock_write()?;
        state.journal.push(GatewayCall::Upload {
            bucket: bucket.to_owned(),
            path: path.to_owned(),
        });
        if let Some(error) = take_failure(&mut state, CallKind::Upload, bucket) {
            return Err(error);
        }
        state.blobs.insert(blob_key(bucket, path), bytes);
        Ok(BlobUrl::new(format!("memory://{bucket}/{path}")))
    }
}
