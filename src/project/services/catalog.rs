//! Service layer for creating, listing, renaming, and deleting projects.

use crate::board::schema::{ASSIGNMENTS_TABLE, TASKS_TABLE};
use crate::gateway::{DataGateway, FetchError, Filter, GatewayError, Row};
use crate::profile::domain::UserId;
use crate::project::domain::{
    Membership, Project, ProjectDomainError, ProjectId, ProjectName, ShareCode,
};
use crate::project::schema::{
    MEMBERS_TABLE, PROJECTS_TABLE, membership_row, new_project_row, project_from_row,
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The stage of a project removal that a failure interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    /// Deleting the assignment rows of the project's tasks.
    Assignments,
    /// Deleting the project's task rows.
    Tasks,
    /// Deleting the project's membership rows.
    Memberships,
    /// Deleting the project row itself.
    Project,
}

impl fmt::Display for CascadeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Self::Assignments => "task assignments",
            Self::Tasks => "tasks",
            Self::Memberships => "memberships",
            Self::Project => "the project row",
        };
        f.write_str(step)
    }
}

/// Service-level errors for project catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Domain validation failed before any network call.
    #[error(transparent)]
    Validation(#[from] ProjectDomainError),

    /// A project read failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// No user is signed in.
    #[error("no user is signed in")]
    NotSignedIn,

    /// Inserting the project row failed.
    #[error("creating the project failed: {source}")]
    CreateProject {
        /// The underlying gateway failure.
        source: GatewayError,
    },

    /// Inserting the owner's membership row failed; the project row was
    /// removed again.
    #[error("linking the owner to the new project failed: {source}")]
    OwnerMembership {
        /// The underlying gateway failure.
        source: GatewayError,
    },

    /// Persisting the new name failed.
    #[error("renaming the project failed: {source}")]
    Rename {
        /// The underlying gateway failure.
        source: GatewayError,
    },

    /// No project row exists for the identifier.
    #[error("unknown project {0}")]
    UnknownProject(ProjectId),

    /// A non-owner attempted to delete the project.
    #[error("only the owner may delete project {0}")]
    NotOwner(ProjectId),

    /// A removal cascade halted mid-way; already-deleted stages stay
    /// deleted, and re-issuing the delete resumes safely.
    #[error("deleting {step} failed during project removal: {source}")]
    Cascade {
        /// The stage the failure interrupted.
        step: CascadeStep,
        /// The underlying gateway failure.
        source: GatewayError,
    },
}

/// Result type for project catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Project catalog orchestration service.
#[derive(Clone)]
pub struct ProjectCatalog<G>
where
    G: DataGateway,
{
    gateway: Arc<G>,
}

impl<G> ProjectCatalog<G>
where
    G: DataGateway,
{
    /// Creates a new project catalog.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Creates a project owned by the signed-in user.
    ///
    /// The owner's membership row is written in the same operation, so the
    /// member table always includes the owner and visibility can derive
    /// from membership rows alone. When that second insert fails the
    /// freshly inserted project row is deleted again.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the name is invalid, nobody is signed
    /// in, or either write is rejected.
    pub async fn create_project(&self, name: &str) -> CatalogResult<Project> {
        let project_name = ProjectName::new(name)?;
        let owner = self.signed_in_user().await?;

        let inserted = self
            .gateway
            .insert_rows(PROJECTS_TABLE, vec![new_project_row(&project_name, &owner)])
            .await
            .map_err(|source| CatalogError::CreateProject { source })?;
        let row = inserted.first().ok_or(CatalogError::CreateProject {
            source: GatewayError::NoRows,
        })?;
        let project = project_from_row(row).map_err(FetchError::from)?;

        let membership = Membership::new(project.id(), owner, ShareCode::random());
        if let Err(source) = self
            .gateway
            .insert_rows(MEMBERS_TABLE, vec![membership_row(&membership)])
            .await
        {
            self.remove_orphaned_project(&project).await;
            return Err(CatalogError::OwnerMembership { source });
        }
        Ok(project)
    }

    /// Lists the projects the user is a member of.
    ///
    /// Membership rows drive visibility; owned projects appear because the
    /// owner is always a member.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Fetch`] when either query fails or a row is
    /// malformed.
    pub async fn projects_for(&self, user: &UserId) -> CatalogResult<Vec<Project>> {
        let memberships = self
            .gateway
            .query_rows(MEMBERS_TABLE, &Filter::new().eq("user_id", user.as_str()))
            .await
            .map_err(FetchError::from)?;
        let project_ids = memberships
            .iter()
            .map(|row| row.read_i64("project_id"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(FetchError::from)?;
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .gateway
            .query_rows(
                PROJECTS_TABLE,
                &Filter::new().one_of("id", project_ids),
            )
            .await
            .map_err(FetchError::from)?;
        let projects = rows
            .iter()
            .map(project_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(FetchError::from)?;
        Ok(projects)
    }

    /// Renames a project and persists the new name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the name is invalid, the update is
    /// rejected, or no project row exists for the identifier.
    pub async fn rename_project(&self, id: ProjectId, name: &str) -> CatalogResult<Project> {
        let project_name = ProjectName::new(name)?;

        let patch = Row::new().with("name", project_name.as_str());
        let updated = self
            .gateway
            .update_rows(PROJECTS_TABLE, &Filter::new().eq("id", id.value()), patch)
            .await
            .map_err(|source| CatalogError::Rename { source })?;
        let row = updated.first().ok_or(CatalogError::UnknownProject(id))?;
        let project = project_from_row(row).map_err(FetchError::from)?;
        Ok(project)
    }

    /// Deletes a project and everything hanging off it.
    ///
    /// Only the owner may delete. The cascade removes task assignments,
    /// then tasks, then memberships, then the project row; a failure
    /// surfaces the interrupted stage and leaves earlier stages deleted.
    /// Deleting zero rows is not an error, so re-issuing the delete resumes
    /// where the cascade halted.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when nobody is signed in, the caller is not
    /// the owner, the project is unknown, or a cascade stage is rejected.
    pub async fn delete_project(&self, id: ProjectId) -> CatalogResult<()> {
        let user = self.signed_in_user().await?;
        let project = self.fetch_project(id).await?;
        if project.owner() != &user {
            return Err(CatalogError::NotOwner(id));
        }

        let task_ids = self.project_task_ids(id).await?;
        if !task_ids.is_empty() {
            let filter = Filter::new().one_of("taskid", task_ids);
            self.gateway
                .delete_rows(ASSIGNMENTS_TABLE, &filter)
                .await
                .map_err(|source| cascade_failure(id, CascadeStep::Assignments, source))?;
        }
        self.gateway
            .delete_rows(TASKS_TABLE, &Filter::new().eq("project_id", id.value()))
            .await
            .map_err(|source| cascade_failure(id, CascadeStep::Tasks, source))?;
        self.gateway
            .delete_rows(MEMBERS_TABLE, &Filter::new().eq("project_id", id.value()))
            .await
            .map_err(|source| cascade_failure(id, CascadeStep::Memberships, source))?;
        self.gateway
            .delete_rows(PROJECTS_TABLE, &Filter::new().eq("id", id.value()))
            .await
            .map_err(|source| cascade_failure(id, CascadeStep::Project, source))?;
        Ok(())
    }

    async fn signed_in_user(&self) -> CatalogResult<UserId> {
        let user = self
            .gateway
            .current_user()
            .await
            .map_err(FetchError::from)?;
        user.ok_or(CatalogError::NotSignedIn)
    }

    async fn fetch_project(&self, id: ProjectId) -> CatalogResult<Project> {
        match self
            .gateway
            .query_one(PROJECTS_TABLE, &Filter::new().eq("id", id.value()))
            .await
        {
            Ok(row) => {
                let project = project_from_row(&row).map_err(FetchError::from)?;
                Ok(project)
            }
            Err(err) if err.is_no_rows() => Err(CatalogError::UnknownProject(id)),
            Err(source) => Err(CatalogError::Fetch(FetchError::Gateway(source))),
        }
    }

    async fn project_task_ids(&self, id: ProjectId) -> CatalogResult<Vec<i64>> {
        let rows = self
            .gateway
            .query_rows(TASKS_TABLE, &Filter::new().eq("project_id", id.value()))
            .await
            .map_err(FetchError::from)?;
        let ids = rows
            .iter()
            .map(|row| row.read_i64("id"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(FetchError::from)?;
        Ok(ids)
    }

    async fn remove_orphaned_project(&self, project: &Project) {
        tracing::warn!(
            project = %project.id(),
            "removing project row after failed owner membership insert"
        );
        if let Err(error) = self
            .gateway
            .delete_rows(PROJECTS_TABLE, &Filter::new().eq("id", project.id().value()))
            .await
        {
            tracing::warn!(
                project = %project.id(),
                error = %error,
                "compensating project delete failed; orphaned row remains"
            );
        }
    }
}

fn cascade_failure(project: ProjectId, step: CascadeStep, source: GatewayError) -> CatalogError {
    tracing::warn!(project = %project, step = %step, error = %source, "project removal halted");
    CatalogError::Cascade { step, source }
}
