//! Assignment toggling with optimistic cache updates.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use super::command::{self, RemoteWriteError, WriteOp};
use super::store::BoardStore;
use crate::board::domain::{BoardMutation, TaskId};
use crate::gateway::{DataGateway, FetchError};
use crate::profile::domain::{UserId, UserProfile};

/// How an assignment toggle concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentChange {
    /// The user is now assigned to the task.
    Assigned,
    /// The user is no longer assigned to the task.
    Unassigned,
    /// A toggle for the same task and user is still in flight; nothing was
    /// changed and nothing was sent.
    InFlight,
}

/// Errors returned by assignment operations.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// The existence check or assignee fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The assignment write failed; the cached list has been rolled back.
    #[error(transparent)]
    Write(#[from] RemoteWriteError),
}

/// Result type for assignment operations.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Toggles task assignments, keeping at most one operation in flight per
/// task-and-user pair.
///
/// The manager is shared between views, so it is handed out behind [`Arc`]
/// rather than cloned.
pub struct AssignmentManager<G>
where
    G: DataGateway,
{
    store: Arc<BoardStore<G>>,
    pending: Mutex<HashSet<(TaskId, UserId)>>,
}

impl<G> AssignmentManager<G>
where
    G: DataGateway,
{
    /// Creates a manager over the shared board store.
    #[must_use]
    pub fn new(store: Arc<BoardStore<G>>) -> Self {
        Self {
            store,
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Toggles `profile`'s assignment on `task`.
    ///
    /// The direction comes from a remote existence check on the exact
    /// assignment pair: present toggles off, absent toggles on. The cached
    /// assignee list updates optimistically in both directions and rolls
    /// back when the write fails. The profile is taken from the caller's
    /// roster rather than refetched.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Fetch`] when the existence check fails
    /// with anything other than the missing-row sentinel, and
    /// [`AssignmentError::Write`] when the remote write fails after the
    /// optimistic update; the cached list has been rolled back by then.
    pub async fn toggle(
        &self,
        task: TaskId,
        profile: &UserProfile,
    ) -> AssignmentResult<AssignmentChange> {
        let Some(slot) = self.claim(task, profile.id()) else {
            return Ok(AssignmentChange::InFlight);
        };
        let result = self.toggle_inner(task, profile).await;
        drop(slot);
        result
    }

    /// Bulk-loads assignee lists for the given tasks into the cache.
    ///
    /// Issues two queries: assignment rows for the tasks, then profiles
    /// for the assigned users.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Fetch`] when a query fails or a row
    /// cannot be decoded; the cached lists stay as they were.
    pub async fn load_assignees(&self, task_ids: &[TaskId]) -> AssignmentResult<()> {
        self.store.refresh_assignees(task_ids).await?;
        Ok(())
    }

    async fn toggle_inner(
        &self,
        task: TaskId,
        profile: &UserProfile,
    ) -> AssignmentResult<AssignmentChange> {
        let user = profile.id();
        let assigned = self
            .store
            .assignment_exists(task, user)
            .await
            .map_err(FetchError::from)?;
        if assigned {
            let mutation = BoardMutation::DropAssignee {
                task,
                user: user.clone(),
            };
            command::optimistic(&self.store, WriteOp::UnassignUser, mutation, || {
                self.store.push_unassignment(task, user)
            })
            .await?;
            Ok(AssignmentChange::Unassigned)
        } else {
            let mutation = BoardMutation::AddAssignee {
                task,
                profile: profile.clone(),
            };
            command::optimistic(&self.store, WriteOp::AssignUser, mutation, || {
                self.store.push_assignment(task, user)
            })
            .await?;
            Ok(AssignmentChange::Assigned)
        }
    }

    /// Claims the pending slot for a pair.
    ///
    /// Returns `None` when a toggle for the pair is already in flight. The
    /// returned slot releases the claim on drop, so the claim cannot leak
    /// even when the toggle's future is dropped mid-flight.
    fn claim(&self, task: TaskId, user: &UserId) -> Option<PendingSlot<'_>> {
        let key = (task, user.clone());
        let mut pending = lock_pending(&self.pending);
        if !pending.insert(key.clone()) {
            return None;
        }
        Some(PendingSlot {
            pending: &self.pending,
            key,
        })
    }
}

/// A claimed toggle slot; dropping it releases the claim.
struct PendingSlot<'a> {
    pending: &'a Mutex<HashSet<(TaskId, UserId)>>,
    key: (TaskId, UserId),
}

impl Drop for PendingSlot<'_> {
    fn drop(&mut self) {
        let mut pending = lock_pending(self.pending);
        pending.remove(&self.key);
    }
}

fn lock_pending(
    pending: &Mutex<HashSet<(TaskId, UserId)>>,
) -> MutexGuard<'_, HashSet<(TaskId, UserId)>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}
