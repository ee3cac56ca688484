//! Application services for project catalog and roster orchestration.

mod catalog;
mod roster;

pub use catalog::{CascadeStep, CatalogError, CatalogResult, ProjectCatalog};
pub use roster::{MembershipOutcome, ProjectRoster, RosterError, RosterResult};
