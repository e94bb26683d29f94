//! Account service: credential reads and soft deletion for owned accounts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{
    AccountPool, AccountPoolError, AccountsCommand, UserStore, UserStoreError,
};

use super::{Account, AccountSource, DeviceId};

fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => Error::store_unavailable(message),
        UserStoreError::Query { message } => Error::internal(message),
    }
}

fn map_account_pool_error(error: AccountPoolError) -> Error {
    match error {
        AccountPoolError::Connection { message } => Error::store_unavailable(message),
        AccountPoolError::Query { message } => Error::internal(message),
    }
}

/// Serves credential bundles to account owners and hides accounts on
/// request.
#[derive(Clone)]
pub struct AccountService<U, A> {
    users: Arc<U>,
    accounts: Arc<A>,
}

impl<U, A> AccountService<U, A> {
    /// Create a new service over the user store and account pool.
    pub fn new(users: Arc<U>, accounts: Arc<A>) -> Self {
        Self { users, accounts }
    }
}

#[async_trait]
impl<U, A> AccountsCommand for AccountService<U, A>
where
    U: UserStore,
    A: AccountPool,
{
    async fn credentials(
        &self,
        device_id: &DeviceId,
        account_id: Uuid,
        source: Option<AccountSource>,
    ) -> Result<Account, Error> {
        let user = self
            .users
            .find_by_device_id(device_id)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(Error::user_not_found)?;

        self.accounts
            .find_owned(user.id, account_id, source)
            .await
            .map_err(map_account_pool_error)?
            .ok_or_else(Error::account_not_found)
    }

    async fn hide(&self, device_id: &DeviceId, account_id: Uuid) -> Result<(), Error> {
        let user = self
            .users
            .find_by_device_id(device_id)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(Error::user_not_found)?;

        // Not-owned and already-hidden both report zero touched rows; either
        // way the caller's view ends up without the account.
        let hidden = self
            .accounts
            .hide(user.id, account_id)
            .await
            .map_err(map_account_pool_error)?;

        if hidden {
            info!(device_id = %device_id, account_id = %account_id, "account hidden");
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
