//! Application services for board state, reconciliation, and reminders.

mod assignment;
mod command;
mod drag;
mod editor;
mod reminder;
mod store;

pub use assignment::{AssignmentChange, AssignmentError, AssignmentManager, AssignmentResult};
pub use command::{CommandOutcome, RemoteWriteError, WriteOp};
pub use drag::{DragOutcome, DragReconciler};
pub use editor::{EditorError, EditorResult, TaskEditor};
pub use reminder::ReminderService;
pub use store::BoardStore;
