//! Inbound adapters driving the ledger.

pub mod http;
