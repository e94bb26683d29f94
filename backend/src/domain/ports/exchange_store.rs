//! Port abstraction for the atomic debit-and-allocate exchange mutation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, AccountDraft};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the exchange adapter.
    pub enum ExchangeStoreError {
        /// The conditional debit matched no row: the balance is below the price.
        InsufficientPoints =>
            "balance does not cover the exchange price",
        /// Store connection could not be established.
        Connection { message: String } =>
            "exchange store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "exchange store query failed: {message}",
    }
}

/// Proof that a debit and an allocation happened together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeReceipt {
    /// The freshly allocated account.
    pub account: Account,
    /// Balance left after the debit.
    pub remaining_points: i32,
}

/// Port for the exchange engine's critical section.
///
/// The debit must be conditional (decrement only while the balance covers
/// the price) and must commit in the same transaction as the account insert:
/// no interleaving may debit without allocating or allocate without
/// debiting. Two concurrent calls racing over one price's worth of points
/// resolve to one receipt and one [`ExchangeStoreError::InsufficientPoints`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeStore: Send + Sync {
    /// Debit `price` from `user_id` and persist `draft` as the allocated
    /// account, atomically.
    async fn debit_and_allocate(
        &self,
        user_id: Uuid,
        price: i32,
        draft: AccountDraft,
    ) -> Result<ExchangeReceipt, ExchangeStoreError>;
}
