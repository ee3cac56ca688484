//! Task creation, revision, and deletion.

use std::sync::Arc;

use thiserror::Error;

use super::command::{self, CommandOutcome, RemoteWriteError, WriteOp};
use super::store::BoardStore;
use crate::board::domain::{
    BoardDomainError, BoardMutation, Task, TaskDraft, TaskId, TaskRevision, TaskStatus, TaskTitle,
};
use crate::board::schema::new_task_row;
use crate::gateway::{DataGateway, FetchError};
use crate::project::domain::ProjectId;

/// Errors returned by task editing operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Domain validation rejected the input before any network call.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),

    /// No user is signed in to create the task as.
    #[error("creating a task requires a signed-in user")]
    NotSignedIn,

    /// A lookup failed or a returned row could not be decoded.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A remote write failed.
    #[error(transparent)]
    Write(#[from] RemoteWriteError),
}

/// Result type for task editing operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Creates, revises, and deletes tasks against the loaded board.
#[derive(Clone)]
pub struct TaskEditor<G>
where
    G: DataGateway,
{
    store: Arc<BoardStore<G>>,
}

impl<G> TaskEditor<G>
where
    G: DataGateway,
{
    /// Creates an editor over the shared board store.
    #[must_use]
    pub const fn new(store: Arc<BoardStore<G>>) -> Self {
        Self { store }
    }

    /// Creates a task in `project`, starting in the To Do column.
    ///
    /// The title is validated before any network call and the creator is
    /// the signed-in user. The row is inserted remotely first; only the
    /// stored row, carrying its backend-assigned id, is appended to the
    /// loaded board, and only when that board is `project`'s. A failed
    /// insert therefore never leaves a phantom task on screen.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Validation`] for an empty title,
    /// [`EditorError::NotSignedIn`] without a session,
    /// [`EditorError::Write`] when the insert fails, and
    /// [`EditorError::Fetch`] when the stored row cannot be read back.
    pub async fn create(&self, project: ProjectId, draft: &TaskDraft) -> EditorResult<Task> {
        let title = TaskTitle::new(draft.title())?;
        let creator = self
            .store
            .current_user()
            .await
            .map_err(FetchError::from)?
            .ok_or(EditorError::NotSignedIn)?;
        let row = new_task_row(project, &title, draft, &creator, TaskStatus::Todo);
        let stored = self
            .store
            .push_new_task(row)
            .await
            .map_err(|error| match error {
                FetchError::Gateway(source) => EditorError::Write(RemoteWriteError {
                    op: WriteOp::CreateTask,
                    source,
                }),
                malformed @ FetchError::MalformedRow(_) => EditorError::Fetch(malformed),
            })?;
        if self.store.project_id() == Some(project) {
            let _inverse = self
                .store
                .apply_local(BoardMutation::InsertTask(stored.clone()));
        }
        Ok(stored)
    }

    /// Applies a field revision to a task.
    ///
    /// Revisions cover title, description, due date, and priority; status
    /// is deliberately not revisable here, so column membership changes
    /// only through drops. The revision applies locally first and is
    /// rolled back with its inverse when persisting fails. Empty revisions
    /// and unknown tasks skip the remote write.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Write`] when the update fails remotely; the
    /// local revision has been rolled back by then.
    pub async fn edit(&self, task: TaskId, revision: TaskRevision) -> EditorResult<CommandOutcome> {
        if revision.is_empty() {
            return Ok(CommandOutcome::Skipped);
        }
        let mutation = BoardMutation::ReviseTask {
            task,
            revision: revision.clone(),
        };
        let outcome = command::optimistic(&self.store, WriteOp::EditTask, mutation, || {
            self.store.push_revision(task, &revision)
        })
        .await?;
        Ok(outcome)
    }

    /// Deletes a task, confirming remotely before touching visible state.
    ///
    /// On success the task and its cached assignee list are removed from
    /// the board; on failure the board is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Write`] when the delete fails remotely.
    pub async fn delete(&self, task: TaskId) -> EditorResult<CommandOutcome> {
        let outcome = command::confirmed(
            &self.store,
            WriteOp::DeleteTask,
            || self.store.push_delete(task),
            BoardMutation::RemoveTask(task),
        )
        .await?;
        Ok(outcome)
    }
}
