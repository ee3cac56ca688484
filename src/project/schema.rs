//! Wire record mapping for project persistence.

use crate::gateway::{Row, RowDecodeError};
use crate::profile::domain::UserId;
use crate::project::domain::{Membership, Project, ProjectId, ProjectName, ShareCode};

/// Table holding one row per project.
pub const PROJECTS_TABLE: &str = "projects";

/// Table holding one row per project membership.
pub const MEMBERS_TABLE: &str = "project_members";

/// Builds the insert row for a new project.
///
/// The `id` column is left to the store, which assigns it serially.
#[must_use]
pub fn new_project_row(name: &ProjectName, owner: &UserId) -> Row {
    Row::new()
        .with("name", name.as_str())
        .with("owner_id", owner.as_str())
}

/// Reads a project from its stored row.
///
/// # Errors
///
/// Returns [`RowDecodeError`] when a column is missing, malformed, or holds
/// a name that fails domain validation.
pub fn project_from_row(row: &Row) -> Result<Project, RowDecodeError> {
    let id = ProjectId::new(row.read_i64("id")?);
    let name = ProjectName::new(row.read_str("name")?)
        .map_err(|_| RowDecodeError::unexpected("name", "a valid project name"))?;
    let owner = UserId::new(row.read_str("owner_id")?);
    Ok(Project::new(id, name, owner))
}

/// Builds the stored row for a membership.
#[must_use]
pub fn membership_row(membership: &Membership) -> Row {
    Row::new()
        .with("project_id", membership.project_id().value())
        .with("user_id", membership.user_id().as_str())
        .with("share_id", membership.share_code().value())
}

/// Reads a membership from its stored row.
///
/// # Errors
///
/// Returns [`RowDecodeError`] when a column is missing or malformed.
pub fn membership_from_row(row: &Row) -> Result<Membership, RowDecodeError> {
    let project_id = ProjectId::new(row.read_i64("project_id")?);
    let user_id = UserId::new(row.read_str("user_id")?);
    let share_code = ShareCode::new(row.read_i64("share_id")?);
    Ok(Membership::new(project_id, user_id, share_code))
}
