//! Trellis: multi-user kanban board state over a remote row store.
//!
//! Trellis keeps a shared project board responsive by treating local state
//! as a cache of the remote backend: mutations apply locally first and are
//! rolled back when the matching remote write fails, while task creation
//! and deletion confirm remotely before becoming visible. Everything
//! reaches the backend through one narrow gateway port, so the whole crate
//! runs unchanged against the in-memory test double.
//!
//! # Architecture
//!
//! Trellis follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board, task, project, and profile types with their
//!   validation rules
//! - **Ports**: The [`gateway::DataGateway`] trait over the remote row and
//!   blob store
//! - **Services**: Orchestration that reconciles local state with remote
//!   writes
//!
//! # Modules
//!
//! - [`gateway`]: Rows, filters, the remote-store port, and its in-memory
//!   double
//! - [`board`]: Column-partitioned board state, drag reconciliation,
//!   assignments, task editing, and reminders
//! - [`project`]: Project catalog and member roster
//! - [`profile`]: User profiles and account registration

pub mod board;
pub mod gateway;
pub mod profile;
pub mod project;
