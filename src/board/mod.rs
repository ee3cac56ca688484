//! The collaborative board core.
//!
//! A board is the per-project partition of tasks into the to do, in
//! progress, and done columns, held locally and reconciled against the
//! remote store: mutations apply to local state immediately and roll back
//! when the matching remote write fails, while creation and deletion
//! confirm remotely before touching visible state. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Wire record mapping in [`schema`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod schema;
pub mod services;
