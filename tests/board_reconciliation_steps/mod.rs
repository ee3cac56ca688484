//! Step definitions for the board reconciliation scenarios.


mod then;
mod when;
