//! Outbound adapters driven by the ledger.

pub mod persistence;
