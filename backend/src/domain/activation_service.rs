//! Activation service: one-time code redemption and logout.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::Error;
use crate::domain::ports::{
    AccountPool, AccountPoolError, ActivationLedger, RedeemCommand, RedeemOutcome,
    RedemptionError, UserStore, UserStoreError,
};

use super::DeviceId;

fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => Error::store_unavailable(message),
        UserStoreError::Query { message } => Error::internal(message),
    }
}

fn map_redemption_error(error: RedemptionError) -> Error {
    match error {
        RedemptionError::InvalidOrUsed => Error::code_invalid_or_used(),
        RedemptionError::Expired => Error::code_expired(),
        RedemptionError::Connection { message } => Error::store_unavailable(message),
        RedemptionError::Query { message } => Error::internal(message),
    }
}

fn map_account_pool_error(error: AccountPoolError) -> Error {
    match error {
        AccountPoolError::Connection { message } => Error::store_unavailable(message),
        AccountPoolError::Query { message } => Error::internal(message),
    }
}

/// Credits one-time codes to a device's balance.
///
/// The single-use guarantee lives in the [`ActivationLedger`] adapter; this
/// service resolves the device, judges expiry against the injected clock,
/// and projects the updated state.
#[derive(Clone)]
pub struct ActivationService<U, L, A> {
    users: Arc<U>,
    ledger: Arc<L>,
    accounts: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<U, L, A> ActivationService<U, L, A> {
    /// Create a new service over the user store, redemption ledger, and
    /// account pool.
    pub fn new(users: Arc<U>, ledger: Arc<L>, accounts: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            ledger,
            accounts,
            clock,
        }
    }
}

#[async_trait]
impl<U, L, A> RedeemCommand for ActivationService<U, L, A>
where
    U: UserStore,
    L: ActivationLedger,
    A: AccountPool,
{
    async fn redeem(&self, device_id: &DeviceId, code: &str) -> Result<RedeemOutcome, Error> {
        if code.trim().is_empty() {
            return Err(Error::invalid_input("code is required"));
        }

        let user = self
            .users
            .find_by_device_id(device_id)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(Error::user_not_found)?;

        let redemption = self
            .ledger
            .redeem(user.id, code, self.clock.utc())
            .await
            .map_err(map_redemption_error)?;

        info!(
            device_id = %device_id,
            code = %redemption.code,
            granted = redemption.points_granted,
            balance = redemption.new_balance,
            "activation code redeemed"
        );

        let accounts = self
            .accounts
            .list_visible(user.id)
            .await
            .map_err(map_account_pool_error)?;

        Ok(RedeemOutcome {
            current_points: redemption.new_balance,
            expires_at: redemption.expires_at,
            accounts,
        })
    }
}

#[cfg(test)]
#[path = "activation_service_tests.rs"]
mod tests;
