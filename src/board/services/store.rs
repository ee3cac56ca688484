//! Locally cached board state, loaded from and written through the gateway.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::domain::{
    Board, BoardColumn, BoardMutation, SortBy, Task, TaskId, TaskRevision, TaskStatus,
};
use crate::board::schema::{
    ASSIGNMENTS_TABLE, TASKS_TABLE, assignment_from_row, assignment_row, revision_patch,
    status_patch, task_from_row,
};
use crate::gateway::{DataGateway, FetchError, Filter, GatewayError, GatewayResult, Row};
use crate::profile::domain::{UserId, UserProfile};
use crate::profile::schema::{PROFILES_TABLE, profile_from_row};
use crate::project::domain::ProjectId;

/// Board state for the most recently loaded project.
struct LoadedBoard {
    project: ProjectId,
    board: Board,
}

/// Holds one project's board in memory and reconciles it against remote
/// storage.
///
/// Mutations apply synchronously under the state lock and never suspend, so
/// concurrent writes interleave as whole mutations. Remote writes are sent
/// through the typed `push_*` methods, one gateway call each; rollback
/// policy lives with the callers.
pub struct BoardStore<G>
where
    G: DataGateway,
{
    gateway: Arc<G>,
    state: RwLock<Option<LoadedBoard>>,
}

impl<G> BoardStore<G>
where
    G: DataGateway,
{
    /// Creates a store backed by the given gateway, with no board loaded.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: RwLock::new(None),
        }
    }

    /// Loads `project`'s board, replacing any previously loaded state.
    ///
    /// Issues three queries: tasks by project, assignment rows by the
    /// loaded task ids, and profiles for the assigned users. On any
    /// failure the previously loaded board is kept untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when a query fails or a row cannot be
    /// decoded.
    pub async fn load(&self, project: ProjectId) -> Result<(), FetchError> {
        let filter = Filter::new().eq("project_id", project.value());
        let task_rows = self.gateway.query_rows(TASKS_TABLE, &filter).await?;
        let tasks = task_rows
            .iter()
            .map(task_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let task_ids: Vec<TaskId> = tasks.iter().map(Task::id).collect();
        let assignees = self.fetch_assignees(&task_ids).await?;
        let board = Board::from_parts(tasks, assignees);
        tracing::debug!(
            project = project.value(),
            tasks = board.task_count(),
            "board loaded"
        );
        let mut state = self.lock_write();
        *state = Some(LoadedBoard { project, board });
        Ok(())
    }

    /// Applies a mutation to the loaded board.
    ///
    /// Returns the inverse mutation for rollback, or `None` when no board
    /// is loaded or the mutation found nothing to change. The store never
    /// rolls back on its own.
    #[must_use]
    pub fn apply_local(&self, mutation: BoardMutation) -> Option<BoardMutation> {
        let mut state = self.lock_write();
        state.as_mut().and_then(|loaded| loaded.board.apply(mutation))
    }

    /// Returns a snapshot of the loaded board.
    #[must_use]
    pub fn board(&self) -> Option<Board> {
        let state = self.lock_read();
        state.as_ref().map(|loaded| loaded.board.clone())
    }

    /// Returns the project the board was loaded for.
    #[must_use]
    pub fn project_id(&self) -> Option<ProjectId> {
        let state = self.lock_read();
        state.as_ref().map(|loaded| loaded.project)
    }

    /// Looks up a task on the loaded board.
    #[must_use]
    pub fn find_task(&self, id: TaskId) -> Option<Task> {
        let state = self.lock_read();
        state
            .as_ref()
            .and_then(|loaded| loaded.board.find_task(id).cloned())
    }

    /// Returns the cached assignee list for a task.
    #[must_use]
    pub fn assignees_of(&self, id: TaskId) -> Vec<UserProfile> {
        let state = self.lock_read();
        state
            .as_ref()
            .map_or_else(Vec::new, |loaded| loaded.board.assignees_of(id).to_vec())
    }

    /// Returns one column of the loaded board, ordered by `sort`.
    ///
    /// The order is recomputed per call and never written back.
    #[must_use]
    pub fn column(&self, column: BoardColumn, sort: SortBy) -> Vec<Task> {
        let state = self.lock_read();
        state
            .as_ref()
            .map_or_else(Vec::new, |loaded| loaded.board.column(column, sort))
    }

    /// Persists a column move for one task.
    ///
    /// Updates that match no row are not an error; the last write wins.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure untouched so the caller can roll back.
    pub async fn push_status(&self, task: TaskId, status: TaskStatus) -> GatewayResult<()> {
        let filter = Filter::new().eq("id", task.value());
        self.gateway
            .update_rows(TASKS_TABLE, &filter, status_patch(status))
            .await?;
        Ok(())
    }

    /// Persists a field revision for one task.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure untouched so the caller can roll back.
    pub async fn push_revision(&self, task: TaskId, revision: &TaskRevision) -> GatewayResult<()> {
        let filter = Filter::new().eq("id", task.value());
        self.gateway
            .update_rows(TASKS_TABLE, &filter, revision_patch(revision))
            .await?;
        Ok(())
    }

    /// Inserts a new task row and returns the stored task, with the id the
    /// backend assigned.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the insert fails or the returned row
    /// cannot be decoded.
    pub async fn push_new_task(&self, row: Row) -> Result<Task, FetchError> {
        let inserted = self.gateway.insert_rows(TASKS_TABLE, vec![row]).await?;
        let stored = inserted.first().ok_or(GatewayError::NoRows)?;
        Ok(task_from_row(stored)?)
    }

    /// Deletes one task row.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure untouched; on failure nothing was
    /// deleted remotely.
    pub async fn push_delete(&self, task: TaskId) -> GatewayResult<()> {
        let filter = Filter::new().eq("id", task.value());
        self.gateway.delete_rows(TASKS_TABLE, &filter).await
    }

    /// Inserts one assignment row.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure untouched so the caller can roll back.
    pub async fn push_assignment(&self, task: TaskId, user: &UserId) -> GatewayResult<()> {
        self.gateway
            .insert_rows(ASSIGNMENTS_TABLE, vec![assignment_row(task, user)])
            .await?;
        Ok(())
    }

    /// Deletes one assignment row.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure untouched so the caller can roll back.
    pub async fn push_unassignment(&self, task: TaskId, user: &UserId) -> GatewayResult<()> {
        let filter = assignment_filter(task, user);
        self.gateway.delete_rows(ASSIGNMENTS_TABLE, &filter).await
    }

    /// Checks remotely whether an assignment row exists for the pair.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure when the check itself fails; a missing
    /// row is the `false` branch, not an error.
    pub async fn assignment_exists(&self, task: TaskId, user: &UserId) -> GatewayResult<bool> {
        let filter = assignment_filter(task, user);
        match self.gateway.query_one(ASSIGNMENTS_TABLE, &filter).await {
            Ok(_) => Ok(true),
            Err(error) if error.is_no_rows() => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// Refetches assignee lists for the given tasks and replaces the
    /// cached lists, clearing the list of any task that no longer has
    /// assignment rows.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when a query fails or a row cannot be
    /// decoded; the cached lists stay as they were.
    pub async fn refresh_assignees(&self, task_ids: &[TaskId]) -> Result<(), FetchError> {
        let lists = self.fetch_assignees(task_ids).await?;
        let mut state = self.lock_write();
        if let Some(loaded) = state.as_mut() {
            for (task, profiles) in lists {
                loaded.board.set_assignees(task, profiles);
            }
        }
        Ok(())
    }

    /// Returns the signed-in user, when there is one.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure when the session lookup fails.
    pub async fn current_user(&self) -> GatewayResult<Option<UserId>> {
        self.gateway.current_user().await
    }

    /// Fetches assignment rows for `task_ids` and resolves them to
    /// profiles, one list per requested task.
    ///
    /// Assignments pointing at users without a profile row are dropped
    /// with a warning rather than failing the whole load.
    async fn fetch_assignees(
        &self,
        task_ids: &[TaskId],
    ) -> Result<Vec<(TaskId, Vec<UserProfile>)>, FetchError> {
        let mut lists: Vec<(TaskId, Vec<UserProfile>)> =
            task_ids.iter().map(|&id| (id, Vec::new())).collect();
        if task_ids.is_empty() {
            return Ok(lists);
        }
        let ids: Vec<i64> = task_ids.iter().map(|id| id.value()).collect();
        let filter = Filter::new().one_of("taskid", ids);
        let assignment_rows = self.gateway.query_rows(ASSIGNMENTS_TABLE, &filter).await?;
        let pairs = assignment_rows
            .iter()
            .map(assignment_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let directory = self.fetch_profiles(&pairs).await?;
        for (task, user) in pairs {
            let Some(profile) = directory.get(&user) else {
                tracing::warn!(
                    user = user.as_str(),
                    "assignment references a user without a profile"
                );
                continue;
            };
            if let Some((_, list)) = lists.iter_mut().find(|(id, _)| *id == task) {
                list.push(profile.clone());
            }
        }
        Ok(lists)
    }

    /// Bulk-fetches the profiles behind a set of assignment pairs.
    async fn fetch_profiles(
        &self,
        pairs: &[(TaskId, UserId)],
    ) -> Result<HashMap<UserId, UserProfile>, FetchError> {
        let mut user_ids: Vec<&str> = Vec::new();
        for (_, user) in pairs {
            if !user_ids.contains(&user.as_str()) {
                user_ids.push(user.as_str());
            }
        }
        let mut directory = HashMap::new();
        if user_ids.is_empty() {
            return Ok(directory);
        }
        let filter = Filter::new().one_of("id", user_ids);
        let profile_rows = self.gateway.query_rows(PROFILES_TABLE, &filter).await?;
        for row in &profile_rows {
            let profile = profile_from_row(row)?;
            directory.insert(profile.id().clone(), profile);
        }
        Ok(directory)
    }

    fn lock_read(&self) -> RwLockReadGuard<'_, Option<LoadedBoard>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_write(&self) -> RwLockWriteGuard<'_, Option<LoadedBoard>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn assignment_filter(task: TaskId, user: &UserId) -> Filter {
    Filter::new()
        .eq("taskid", task.value())
        .eq("tauid", user.as_str())
}
