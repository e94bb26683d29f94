//! Exchange service: spend points, receive an exclusive-use account.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::Error;
use crate::domain::ports::{
    ExchangeCommand, ExchangeOutcome, ExchangeStore, ExchangeStoreError, UserStore,
    UserStoreError,
};

use super::{AccountDraft, AccountSource, DeviceId};

/// Fixed price of one pool account, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangePricing {
    price: i32,
}

impl ExchangePricing {
    /// Default price when configuration does not override it.
    pub const DEFAULT_PRICE: i32 = 100;

    /// Price a configured number of points per account.
    ///
    /// Non-positive prices fall back to the default rather than making
    /// accounts free.
    pub fn new(price: i32) -> Self {
        let price = if price > 0 { price } else { Self::DEFAULT_PRICE };
        Self { price }
    }

    /// Points debited per allocated account.
    pub const fn price(self) -> i32 {
        self.price
    }
}

impl Default for ExchangePricing {
    fn default() -> Self {
        Self {
            price: Self::DEFAULT_PRICE,
        }
    }
}

fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => Error::store_unavailable(message),
        UserStoreError::Query { message } => Error::internal(message),
    }
}

/// Debits the configured price and allocates one pool account, atomically.
///
/// The no-debit-without-allocation guarantee lives in the [`ExchangeStore`]
/// adapter; this service resolves the device, drafts the placeholder
/// credentials, and maps the conditional-debit failure to the caller-facing
/// insufficient-points error.
#[derive(Clone)]
pub struct ExchangeService<U, X> {
    users: Arc<U>,
    store: Arc<X>,
    pricing: ExchangePricing,
    clock: Arc<dyn Clock>,
}

impl<U, X> ExchangeService<U, X> {
    /// Create a new service over the user store and exchange store.
    pub fn new(
        users: Arc<U>,
        store: Arc<X>,
        pricing: ExchangePricing,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            store,
            pricing,
            clock,
        }
    }
}

#[async_trait]
impl<U, X> ExchangeCommand for ExchangeService<U, X>
where
    U: UserStore,
    X: ExchangeStore,
{
    async fn exchange(
        &self,
        device_id: &DeviceId,
        source: AccountSource,
    ) -> Result<ExchangeOutcome, Error> {
        let user = self
            .users
            .find_by_device_id(device_id)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(Error::user_not_found)?;

        let price = self.pricing.price();
        let draft = AccountDraft::placeholder(source, self.clock.utc());

        let receipt = self
            .store
            .debit_and_allocate(user.id, price, draft)
            .await
            .map_err(|error| match error {
                ExchangeStoreError::InsufficientPoints => Error::insufficient_points(price),
                ExchangeStoreError::Connection { message } => Error::store_unavailable(message),
                ExchangeStoreError::Query { message } => Error::internal(message),
            })?;

        info!(
            device_id = %device_id,
            account_id = %receipt.account.id,
            source = %source,
            remaining = receipt.remaining_points,
            "account exchanged"
        );

        Ok(ExchangeOutcome {
            account: receipt.account,
            remaining_points: receipt.remaining_points,
        })
    }
}

#[cfg(test)]
#[path = "exchange_service_tests.rs"]
mod tests;
