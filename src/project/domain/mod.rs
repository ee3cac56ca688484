//! Domain model for projects and membership.

mod error;
mod ids;
mod project;

pub use error::ProjectDomainError;
pub use ids::{ProjectId, ShareCode};
pub use project::{Membership, Project, ProjectName};
