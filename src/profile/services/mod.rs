//! Application services for account and profile orchestration.

mod account;

pub use account::{AccountError, AccountResult, AccountService, RegistrationOutcome};
