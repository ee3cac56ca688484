//! Wire record mapping for task persistence.

use chrono::NaiveDate;
use serde_json::Value;

use crate::board::domain::{
    PersistedTaskData, Priority, Task, TaskDraft, TaskId, TaskRevision, TaskStatus, TaskTitle,
};
use crate::gateway::{Row, RowDecodeError};
use crate::profile::domain::UserId;
use crate::project::domain::ProjectId;

/// Table holding one row per task.
pub const TASKS_TABLE: &str = "tasks";

/// Table holding one row per task-to-user assignment.
pub const ASSIGNMENTS_TABLE: &str = "task_assignments";

/// Due dates are stored as ISO calendar dates without a time component.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds the insert row for a new task.
///
/// The `id` column is assigned by the backend; optional columns are written
/// only when the draft sets them.
#[must_use]
pub fn new_task_row(
    project: ProjectId,
    title: &TaskTitle,
    draft: &TaskDraft,
    creator: &UserId,
    status: TaskStatus,
) -> Row {
    let mut row = Row::new()
        .with("project_id", project.value())
        .with("title", title.as_str())
        .with("priority", draft.priority().as_str())
        .with("status", status.code())
        .with("creator_id", creator.as_str());
    if let Some(description) = draft.description() {
        row.set("description", description);
    }
    if let Some(due_date) = draft.due_date() {
        row.set("due_date", format_date(due_date));
    }
    row
}

/// Reads a task from its stored row.
///
/// # Errors
///
/// Returns [`RowDecodeError`] when a column is missing, malformed, or holds
/// a value outside the domain vocabulary.
pub fn task_from_row(row: &Row) -> Result<Task, RowDecodeError> {
    let title = TaskTitle::new(row.read_str("title")?)
        .map_err(|_| RowDecodeError::unexpected("title", "a non-empty title"))?;
    let due_date = row.read_opt_str("due_date")?.map(parse_date).transpose()?;
    let priority = Priority::try_from(row.read_str("priority")?)
        .map_err(|_| RowDecodeError::unexpected("priority", "low, medium, or high"))?;
    let status = TaskStatus::from_code(row.read_i64("status")?)
        .map_err(|_| RowDecodeError::unexpected("status", "a status code between 1 and 3"))?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(row.read_i64("id")?),
        project_id: ProjectId::new(row.read_i64("project_id")?),
        title,
        description: row.read_opt_str("description")?.map(str::to_owned),
        due_date,
        priority,
        status,
        creator: UserId::new(row.read_str("creator_id")?),
    }))
}

/// Builds the update patch for a field revision.
///
/// Cleared optional fields are written as explicit nulls. The patch never
/// carries a `status` column; status changes go through column moves.
#[must_use]
pub fn revision_patch(revision: &TaskRevision) -> Row {
    let mut patch = Row::new();
    if let Some(title) = revision.title() {
        patch.set("title", title.as_str());
    }
    if let Some(description) = revision.description() {
        patch.set("description", description.map_or(Value::Null, Value::from));
    }
    if let Some(due_date) = revision.due_date() {
        let value = due_date.map_or(Value::Null, |date| Value::from(format_date(date)));
        patch.set("due_date", value);
    }
    if let Some(priority) = revision.priority() {
        patch.set("priority", priority.as_str());
    }
    patch
}

/// Builds the update patch for a column move.
#[must_use]
pub fn status_patch(status: TaskStatus) -> Row {
    Row::new().with("status", status.code())
}

/// Builds the stored row for an assignment.
#[must_use]
pub fn assignment_row(task: TaskId, user: &UserId) -> Row {
    Row::new()
        .with("taskid", task.value())
        .with("tauid", user.as_str())
}

/// Reads an assignment pair from its stored row.
///
/// # Errors
///
/// Returns [`RowDecodeError`] when a column is missing or malformed.
pub fn assignment_from_row(row: &Row) -> Result<(TaskId, UserId), RowDecodeError> {
    let task = TaskId::new(row.read_i64("taskid")?);
    let user = UserId::new(row.read_str("tauid")?);
    Ok((task, user))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(raw: &str) -> Result<NaiveDate, RowDecodeError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| RowDecodeError::unexpected("due_date", "an ISO calendar date"))
}
