//! Drop-gesture reconciliation between board columns.

use std::sync::Arc;

use super::command::{self, CommandOutcome, RemoteWriteError, WriteOp};
use super::store::BoardStore;
use crate::board::domain::{BoardColumn, BoardMutation, TaskId};
use crate::gateway::DataGateway;

/// How a drop gesture concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The task changed columns and the move was persisted.
    Moved,
    /// The gesture ended outside any drop target.
    NoTarget,
    /// The gesture named a column this board does not have.
    RejectedColumn,
    /// The dragged task is not on the board.
    UnknownTask,
    /// The task was dropped onto the column it already occupies.
    AlreadyThere,
}

/// Turns finished drop gestures into persisted column moves.
#[derive(Clone)]
pub struct DragReconciler<G>
where
    G: DataGateway,
{
    store: Arc<BoardStore<G>>,
}

impl<G> DragReconciler<G>
where
    G: DataGateway,
{
    /// Creates a reconciler over the shared board store.
    #[must_use]
    pub const fn new(store: Arc<BoardStore<G>>) -> Self {
        Self { store }
    }

    /// Concludes a drop gesture for `task` onto `destination`.
    ///
    /// Gestures without a usable destination are discarded without
    /// touching state or the network: a missing destination, an unknown
    /// column identifier, an unknown task, or a drop onto the current
    /// column each map to their own outcome. A real move applies locally
    /// first and rolls back if persisting the status fails. There is no
    /// retry; when two gestures race on the same task the last remote
    /// write wins.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteWriteError`] when the status update fails remotely;
    /// the local move has been rolled back by then.
    pub async fn drag_end(
        &self,
        task: TaskId,
        destination: Option<&str>,
    ) -> Result<DragOutcome, RemoteWriteError> {
        let Some(identifier) = destination else {
            return Ok(DragOutcome::NoTarget);
        };
        let Some(column) = BoardColumn::from_identifier(identifier) else {
            tracing::warn!(column = identifier, "ignoring drop onto unknown column");
            return Ok(DragOutcome::RejectedColumn);
        };
        let Some(current) = self.store.find_task(task) else {
            return Ok(DragOutcome::UnknownTask);
        };
        let status = column.status();
        if current.status() == status {
            return Ok(DragOutcome::AlreadyThere);
        }
        let mutation = BoardMutation::MoveTask { task, status };
        let outcome = command::optimistic(&self.store, WriteOp::MoveTask, mutation, || {
            self.store.push_status(task, status)
        })
        .await?;
        match outcome {
            CommandOutcome::Committed => Ok(DragOutcome::Moved),
            // The task vanished between the lookup and the mutation.
            CommandOutcome::Skipped => Ok(DragOutcome::UnknownTask),
        }
    }
}
