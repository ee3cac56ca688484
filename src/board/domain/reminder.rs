//! Due-date digest types for assigned tasks.

use super::task::Task;
use crate::project::domain::ProjectName;

/// One task in a reminder digest, paired with its project's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEntry {
    task: Task,
    project_name: ProjectName,
}

impl ReminderEntry {
    /// Pairs a task with the name of the project it belongs to.
    #[must_use]
    pub const fn new(task: Task, project_name: ProjectName) -> Self {
        Self { task, project_name }
    }

    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the name of the owning project.
    #[must_use]
    pub const fn project_name(&self) -> &ProjectName {
        &self.project_name
    }
}

/// Unfinished tasks across a user's projects, grouped by how urgent their
/// due dates are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderDigest {
    overdue: Vec<ReminderEntry>,
    upcoming: Vec<ReminderEntry>,
}

impl ReminderDigest {
    /// Assembles a digest from already-ordered buckets.
    #[must_use]
    pub const fn new(overdue: Vec<ReminderEntry>, upcoming: Vec<ReminderEntry>) -> Self {
        Self { overdue, upcoming }
    }

    /// Tasks whose due date passed within the lookback window.
    #[must_use]
    pub fn overdue(&self) -> &[ReminderEntry] {
        &self.overdue
    }

    /// Tasks due today or later.
    #[must_use]
    pub fn upcoming(&self) -> &[ReminderEntry] {
        &self.upcoming
    }

    /// Returns `true` when the digest holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.upcoming.is_empty()
    }
}
