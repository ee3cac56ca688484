//! Service layer for listing, searching, and adding project members.

use crate::gateway::{DataGateway, FetchError, Filter, GatewayError};
use crate::profile::domain::{UserId, UserProfile};
use crate::profile::schema::{PROFILES_TABLE, profile_from_row};
use crate::project::domain::{Membership, ProjectId, ShareCode};
use crate::project::schema::{MEMBERS_TABLE, membership_row};
use std::sync::Arc;
use thiserror::Error;

/// Outcome of an add-member attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipOutcome {
    /// A fresh membership row was inserted.
    Added(Membership),
    /// The user was already a member; nothing was written.
    AlreadyMember,
}

/// Service-level errors for roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A roster read failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Inserting the membership row failed.
    #[error("adding the member failed: {source}")]
    AddMember {
        /// The underlying gateway failure.
        source: GatewayError,
    },
}

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Project roster orchestration service.
#[derive(Clone)]
pub struct ProjectRoster<G>
where
    G: DataGateway,
{
    gateway: Arc<G>,
}

impl<G> ProjectRoster<G>
where
    G: DataGateway,
{
    /// Creates a new project roster.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists the profiles of a project's members.
    ///
    /// Two queries regardless of member count: the membership rows, then
    /// one bulk profile fetch.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Fetch`] when either query fails or a row is
    /// malformed.
    pub async fn members(&self, project: ProjectId) -> RosterResult<Vec<UserProfile>> {
        let memberships = self
            .gateway
            .query_rows(
                MEMBERS_TABLE,
                &Filter::new().eq("project_id", project.value()),
            )
            .await
            .map_err(FetchError::from)?;
        let user_ids = memberships
            .iter()
            .map(|row| row.read_str("user_id").map(str::to_owned))
            .collect::<Result<Vec<_>, _>>()
            .map_err(FetchError::from)?;
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .gateway
            .query_rows(
                PROFILES_TABLE,
                &Filter::new().one_of("id", user_ids),
            )
            .await
            .map_err(FetchError::from)?;
        let profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(FetchError::from)?;
        Ok(profiles)
    }

    /// Searches registered users by display-name fragment.
    ///
    /// The match is a case-insensitive substring. A blank fragment returns
    /// no results without issuing a query.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Fetch`] when the query fails or a row is
    /// malformed.
    pub async fn search(&self, fragment: &str) -> RosterResult<Vec<UserProfile>> {
        let needle = fragment.trim();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .gateway
            .query_rows(
                PROFILES_TABLE,
                &Filter::new().ilike("display_name", format!("%{needle}%")),
            )
            .await
            .map_err(FetchError::from)?;
        let profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(FetchError::from)?;
        Ok(profiles)
    }

    /// Adds a user to a project unless they already belong to it.
    ///
    /// The existence check keys on the exact `(project, user)` pair, so
    /// adding is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] when the existence check fails or the insert
    /// is rejected.
    pub async fn add_member(
        &self,
        project: ProjectId,
        user: &UserId,
    ) -> RosterResult<MembershipOutcome> {
        let filter = Filter::new()
            .eq("project_id", project.value())
            .eq("user_id", user.as_str());
        let existing = self
            .gateway
            .query_rows(MEMBERS_TABLE, &filter)
            .await
            .map_err(FetchError::from)?;
        if !existing.is_empty() {
            return Ok(MembershipOutcome::AlreadyMember);
        }

        let membership = Membership::new(project, user.clone(), ShareCode::random());
        self.gateway
            .insert_rows(MEMBERS_TABLE, vec![membership_row(&membership)])
            .await
            .map_err(|source| RosterError::AddMember { source })?;
        Ok(MembershipOutcome::Added(membership))
    }
}
