//! Entitlement ledger and account-exchange backend.
//!
//! Anonymous devices accrue points through one-time activation codes and
//! spend them on exclusive-use credential bundles drawn from a shared pool.
//! The crate is laid out hexagonally: the ledger rules live in [`domain`],
//! HTTP handlers in [`inbound`] translate requests into port calls, and the
//! Diesel adapters in [`outbound`] carry the atomic critical sections.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::RequestTrace;
