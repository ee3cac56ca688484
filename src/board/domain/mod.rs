//! Domain model for boards, tasks, and reminders.
//!
//! The board domain keeps the three-column partition and its invariants in
//! pure types: every loaded task lives in exactly one column, determined
//! solely by its status, and every mutation yields the inverse mutation the
//! services use for rollback.

mod board;
mod error;
mod ids;
mod mutation;
mod reminder;
mod task;

pub use board::{Board, BoardColumn, SortBy};
pub use error::BoardDomainError;
pub use ids::TaskId;
pub use mutation::BoardMutation;
pub use reminder::{ReminderDigest, ReminderEntry};
pub use task::{PersistedTaskData, Priority, Task, TaskDraft, TaskRevision, TaskStatus, TaskTitle};
