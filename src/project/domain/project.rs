//! Project aggregate, validated name, and membership record.

use super::error::ProjectDomainError;
use super::ids::{ProjectId, ShareCode};
use crate::profile::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Parses a project name from raw input, trimming surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the trimmed
    /// input is empty.
    pub fn new(raw: &str) -> Result<Self, ProjectDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A project as stored: identifier, name, and owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    owner: UserId,
}

impl Project {
    /// Assembles a project from already-validated parts.
    #[must_use]
    pub const fn new(id: ProjectId, name: ProjectName, owner: UserId) -> Self {
        Self { id, name, owner }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }
}

/// One user's membership in one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    project_id: ProjectId,
    user_id: UserId,
    share_code: ShareCode,
}

impl Membership {
    /// Assembles a membership record.
    #[must_use]
    pub const fn new(project_id: ProjectId, user_id: UserId, share_code: ShareCode) -> Self {
        Self {
            project_id,
            user_id,
            share_code,
        }
    }

    /// Returns the project this membership belongs to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the share code minted for this membership.
    #[must_use]
    pub const fn share_code(&self) -> ShareCode {
        self.share_code
    }
}
