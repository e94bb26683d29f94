//! Port abstraction for reading and hiding pool accounts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, AccountSource};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the account pool adapter.
    pub enum AccountPoolError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "account pool connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account pool query failed: {message}",
    }
}

/// Port for per-owner account queries and the soft-delete flag.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountPool: Send + Sync {
    /// All non-hidden accounts owned by `user_id`, newest first. The order
    /// is stable: ties on creation time break on id.
    async fn list_visible(&self, user_id: Uuid) -> Result<Vec<Account>, AccountPoolError>;

    /// The account with `account_id` if `user_id` owns it (and it matches
    /// `source`, when given). Hidden accounts are still returned; hiding
    /// only removes an account from the visible list.
    async fn find_owned(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        source: Option<AccountSource>,
    ) -> Result<Option<Account>, AccountPoolError>;

    /// Set the hidden flag on an owned account. Returns whether a row was
    /// touched; hiding someone else's account touches nothing.
    async fn hide(&self, user_id: Uuid, account_id: Uuid) -> Result<bool, AccountPoolError>;
}
