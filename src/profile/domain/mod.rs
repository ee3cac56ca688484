//! Domain model for user profiles.
//!
//! Profiles carry the identity-provider user id, a validated display name,
//! and an optional avatar URL, keeping all storage concerns outside the
//! domain boundary.

mod error;
mod ids;
mod profile;

pub use error::ProfileDomainError;
pub use ids::UserId;
pub use profile::{DisplayName, UserProfile};
