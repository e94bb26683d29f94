//! HTTP gateway: the boundary between validated requests and the ledger.
//!
//! Handlers translate JSON bodies into port calls and port results into the
//! `{code, message?, data?}` envelope. No ledger rule lives here; the
//! handlers validate shape, delegate, and format.

pub mod accounts;
pub mod activation;
pub mod admin;
pub mod announcement;
pub mod dto;
pub mod envelope;
pub mod exchange;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, crate::domain::Error>;
