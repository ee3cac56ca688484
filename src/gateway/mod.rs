//! Remote data gateway port and test adapter.
//!
//! Every bounded context persists through the same backend-as-a-service
//! surface: filtered row queries, row writes, the currently signed-in user,
//! and blob uploads. This module owns that contract ([`DataGateway`]), the
//! row and filter models it speaks, the gateway error taxonomy, and the
//! in-memory adapter the test suites run against.
//!
//! The gateway client is always an injected dependency: services receive an
//! `Arc` of a concrete gateway at construction time and never reach for
//! ambient global state.

mod error;
mod filter;
mod memory;
mod port;
mod row;

pub use error::{FetchError, GatewayError, GatewayResult};
pub use filter::{Condition, Filter};
pub use memory::{GatewayCall, InMemoryGateway};
pub use port::{BlobUrl, DataGateway};
pub use row::{Row, RowDecodeError};

#[cfg(test)]
mod tests;
