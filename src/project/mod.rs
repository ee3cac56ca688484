//! Projects and their membership.
//!
//! A project is the unit of sharing: every board belongs to a project, and
//! visibility derives from membership rows (the owner included). The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Wire record mapping in [`schema`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod schema;
pub mod services;
