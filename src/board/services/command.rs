//! Shared write orchestration for board mutations.
//!
//! Every mutating operation follows one of two shapes. Optimistic writes
//! apply the local mutation first, send the remote write, and roll the
//! mutation back with its inverse when the write fails. Confirmed writes
//! send the remote write first and touch local state only on success;
//! creation and deletion use this shape so a failed write can never leave
//! a phantom task on screen.

use std::fmt;
use std::future::Future;

use thiserror::Error;

use super::store::BoardStore;
use crate::board::domain::BoardMutation;
use crate::gateway::{DataGateway, GatewayError, GatewayResult};

/// The remote write being attempted, named for error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    /// Persisting a column move.
    MoveTask,
    /// Persisting a field revision.
    EditTask,
    /// Inserting a new task row.
    CreateTask,
    /// Deleting a task row.
    DeleteTask,
    /// Inserting an assignment row.
    AssignUser,
    /// Deleting an assignment row.
    UnassignUser,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MoveTask => "moving the task",
            Self::EditTask => "editing the task",
            Self::CreateTask => "creating the task",
            Self::DeleteTask => "deleting the task",
            Self::AssignUser => "assigning the user",
            Self::UnassignUser => "unassigning the user",
        };
        f.write_str(label)
    }
}

/// A remote write failed.
///
/// For optimistic writes the local mutation has been rolled back; for
/// confirmed writes local state was never touched.
#[derive(Debug, Error)]
#[error("{op} failed: {source}")]
pub struct RemoteWriteError {
    /// The write that failed.
    pub op: WriteOp,
    /// The underlying gateway failure.
    pub source: GatewayError,
}

/// How a board write concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The mutation applied and the remote write went through.
    Committed,
    /// The mutation found nothing to do; no remote write was sent.
    Skipped,
}

/// Applies `mutation` locally, then sends the remote write, rolling the
/// mutation back when the write fails.
pub(crate) async fn optimistic<G, F, Fut>(
    store: &BoardStore<G>,
    op: WriteOp,
    mutation: BoardMutation,
    send: F,
) -> Result<CommandOutcome, RemoteWriteError>
where
    G: DataGateway,
    F: FnOnce() -> Fut,
    Fut: Future<Output = GatewayResult<()>>,
{
    let Some(inverse) = store.apply_local(mutation) else {
        return Ok(CommandOutcome::Skipped);
    };
    match send().await {
        Ok(()) => Ok(CommandOutcome::Committed),
        Err(source) => {
            tracing::warn!(%op, error = %source, "remote write failed, rolling back");
            let _restored = store.apply_local(inverse);
            Err(RemoteWriteError { op, source })
        }
    }
}

/// Sends the remote write first and applies `mutation` only on success.
pub(crate) async fn confirmed<G, F, Fut>(
    store: &BoardStore<G>,
    op: WriteOp,
    send: F,
    mutation: BoardMutation,
) -> Result<CommandOutcome, RemoteWriteError>
where
    G: DataGateway,
    F: FnOnce() -> Fut,
    Fut: Future<Output = GatewayResult<()>>,
{
    match send().await {
        Ok(()) => {
            let _applied = store.apply_local(mutation);
            Ok(CommandOutcome::Committed)
        }
        Err(source) => Err(RemoteWriteError { op, source }),
    }
}
