//! Identity resolution service: device identifier to user record.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    AccountPool, AccountPoolError, IdentityCommand, LoginOutcome, LogoutOutcome, UserStore,
    UserStoreError,
};

use super::DeviceId;

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

/// Resolves devices to users, creating a zero-balance record on first
/// contact.
#[derive(Clone)]
pub struct IdentityService<U, A> {
    users: Arc<U>,
    accounts: Arc<A>,
}

impl<U, A> IdentityService<U, A> {
    /// Create a new service over the user store and account pool.
    pub fn new(users: Arc<U>, accounts: Arc<A>) -> Self {
        Self { users, accounts }
    }
}

#[async_trait]
impl<U, A> IdentityCommand for IdentityService<U, A>
where
    U: UserStore,
    A: AccountPool,
{
    async fn login(&self, device_id: &DeviceId) -> Result<LoginOutcome, Error> {
        let user = self
            .users
            .resolve_or_create(device_id)
            .await
            .map_err(map_user_store_error)?;

        let accounts = self
            .accounts
            .list_visible(user.id)
            .await
            .map_err(map_account_pool_error)?;

        Ok(LoginOutcome { user, accounts })
    }

    async fn logout(&self, device_id: &DeviceId) -> Result<LogoutOutcome, Error> {
        let cleared = self
            .users
            .clear_activation(device_id)
            .await
            .map_err(map_user_store_error)?;

        Ok(LogoutOutcome { cleared })
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
