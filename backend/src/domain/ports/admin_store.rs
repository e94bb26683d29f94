//! Port abstraction for administrative code minting and ledger counts.

use async_trait::async_trait;

use crate::domain::{ActivationCode, ActivationCodeDraft};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced when minting activation codes.
    pub enum MintCodeError {
        /// A code with the same string already exists.
        DuplicateCode =>
            "activation code already exists",
        /// Store connection could not be established.
        Connection { message: String } =>
            "admin store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "admin store query failed: {message}",
    }
}

define_port_error! {
    /// Errors surfaced when reading ledger counts.
    pub enum AdminStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "admin store connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "admin store query failed: {message}",
    }
}

/// Read-only projection of ledger volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerStats {
    /// Registered users.
    pub total_users: i64,
    /// Visible (non-hidden) allocated accounts.
    pub total_accounts: i64,
    /// Codes still waiting to be redeemed.
    pub unused_codes: i64,
}

/// Port for the administrative surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Persist a new activation code. The unique key on the code string
    /// rejects duplicates.
    async fn mint_code(&self, draft: &ActivationCodeDraft)
    -> Result<ActivationCode, MintCodeError>;

    /// Current ledger counts.
    async fn stats(&self) -> Result<LedgerStats, AdminStoreError>;
}
