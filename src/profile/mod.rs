//! User profiles and account plumbing.
//!
//! Profiles are the application-side identity record kept alongside the
//! external identity provider: a display name and an optional avatar. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Wire record mapping in [`schema`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod schema;
pub mod services;
