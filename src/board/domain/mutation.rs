//! Mutations applied to in-memory board state.

use super::ids::TaskId;
use super::task::{Task, TaskRevision, TaskStatus};
use crate::profile::domain::{UserId, UserProfile};

/// A single change to board state.
///
/// Applying a mutation yields an inverse mutation that undoes it; the
/// optimistic write path applies that inverse when the matching remote
/// write fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardMutation {
    /// Adds a task to the column matching its status.
    InsertTask(Task),
    /// Removes a task and its assignee list.
    ///
    /// The inverse reinserts the task without its assignee list.
    RemoveTask(TaskId),
    /// Moves a task to a different workflow status.
    MoveTask {
        /// Task to move.
        task: TaskId,
        /// Status to move it to.
        status: TaskStatus,
    },
    /// Edits task fields in place.
    ReviseTask {
        /// Task to edit.
        task: TaskId,
        /// Field changes to apply.
        revision: TaskRevision,
    },
    /// Adds a user to a task's assignee list.
    AddAssignee {
        /// Task gaining the assignee.
        task: TaskId,
        /// Profile of the added user.
        profile: UserProfile,
    },
    /// Removes a user from a task's assignee list.
    DropAssignee {
        /// Task losing the assignee.
        task: TaskId,
        /// Identifier of the removed user.
        user: UserId,
    },
    /// Replaces a task's assignee list wholesale.
    SetAssignees {
        /// Task whose list is replaced.
        task: TaskId,
        /// New assignee list.
        profiles: Vec<UserProfile>,
    },
}
