//! Task aggregate and the value types that describe it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::BoardDomainError;
use super::ids::TaskId;
use crate::profile::domain::UserId;
use crate::project::domain::ProjectId;

/// Validated task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Parses a title from raw input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the trimmed input is
    /// empty.
    pub fn new(raw: &str) -> Result<Self, BoardDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task urgency, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Ordinary urgency.
    #[default]
    Medium,
    /// Should be picked up first.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = BoardDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(BoardDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

/// Workflow state stored with each task.
///
/// Each state corresponds to exactly one board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Work has not started.
    Todo,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// Returns the numeric storage code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Todo => 1,
            Self::InProgress => 2,
            Self::Done => 3,
        }
    }

    /// Maps a numeric storage code back to a status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownStatusCode`] when the code is not
    /// one of the three known values.
    pub const fn from_code(code: i64) -> Result<Self, BoardDomainError> {
        match code {
            1 => Ok(Self::Todo),
            2 => Ok(Self::InProgress),
            3 => Ok(Self::Done),
            _ => Err(BoardDomainError::UnknownStatusCode(code)),
        }
    }
}

/// Task aggregate as held in board state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    priority: Priority,
    status: TaskStatus,
    creator: UserId,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Project the task belongs to.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// User who created the task.
    pub creator: UserId,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            priority: data.priority,
            status: data.status,
            creator: data.creator,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the identifier of the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if one is set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if one is set.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the identifier of the user who created the task.
    #[must_use]
    pub const fn creator(&self) -> &UserId {
        &self.creator
    }

    /// Moves the task to a new workflow status.
    pub(super) const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Applies `revision` to this task and returns the inverse revision
    /// that restores the previous field values.
    pub(super) fn apply_revision(&mut self, revision: &TaskRevision) -> TaskRevision {
        let mut inverse = TaskRevision::new();
        if let Some(title) = &revision.title {
            inverse.title = Some(std::mem::replace(&mut self.title, title.clone()));
        }
        if let Some(description) = &revision.description {
            let previous = std::mem::replace(&mut self.description, description.clone());
            inverse.description = Some(previous);
        }
        if let Some(due_date) = revision.due_date {
            inverse.due_date = Some(self.due_date);
            self.due_date = due_date;
        }
        if let Some(priority) = revision.priority {
            inverse.priority = Some(self.priority);
            self.priority = priority;
        }
        inverse
    }
}

/// Unvalidated input for creating a new task.
///
/// The title stays raw until task creation validates it, so callers can
/// collect form input without intermediate errors.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    priority: Priority,
}

impl TaskDraft {
    /// Creates a draft with the given raw title and default priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority: Priority::default(),
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches a due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Overrides the default priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the raw title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if one was provided.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if one was provided.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the chosen priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}

/// Field-level change set applied to an existing task.
///
/// Every field distinguishes "leave unchanged" from "set to a new value";
/// description and due date additionally support "clear". Workflow status is
/// deliberately absent: status only changes through column moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRevision {
    title: Option<TaskTitle>,
    description: Option<Option<String>>,
    due_date: Option<Option<NaiveDate>>,
    priority: Option<Priority>,
}

impl TaskRevision {
    /// Creates a revision that changes nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            due_date: None,
            priority: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns `true` when the revision changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
    }

    /// Returns the replacement title, if the revision sets one.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the description change, if the revision makes one.
    ///
    /// The outer `Option` marks whether the field changes at all; the inner
    /// value is the new description, with `None` meaning "cleared".
    #[must_use]
    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }

    /// Returns the due date change, if the revision makes one.
    ///
    /// The outer `Option` marks whether the field changes at all; the inner
    /// value is the new due date, with `None` meaning "cleared".
    #[must_use]
    pub const fn due_date(&self) -> Option<Option<NaiveDate>> {
        self.due_date
    }

    /// Returns the replacement priority, if the revision sets one.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }
}
