//! Unit tests for the data gateway port and its in-memory adapter.
//!
//! Tests cover row decoding, filter matching, the port's provided
//! single-row query, and the journal, failure injection, and storage
//! behaviour of the in-memory gateway.
