//! Port abstraction for atomic activation-code redemption.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the redemption adapter.
    pub enum RedemptionError {
        /// The code does not exist or its one-shot flag is already set.
        InvalidOrUsed =>
            "activation code is invalid or already used",
        /// The code's validity window has passed.
        Expired =>
            "activation code has expired",
        /// Store connection could not be established.
        Connection { message: String } =>
            "activation ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "activation ledger query failed: {message}",
    }
}

/// Result of a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redemption {
    /// The redeemed code string, now the user's activation marker.
    pub code: String,
    /// Points the code was worth.
    pub points_granted: i32,
    /// The user's balance after the credit.
    pub new_balance: i32,
    /// Expiry of the redeemed code.
    pub expires_at: DateTime<Utc>,
}

/// Port for the one-shot redeem-and-credit mutation.
///
/// Implementations must make the used-flag flip and the point credit a
/// single atomic unit against the code row: of N concurrent calls for one
/// code, exactly one returns a [`Redemption`] and the rest fail with
/// [`RedemptionError::InvalidOrUsed`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivationLedger: Send + Sync {
    /// Redeem `code` for `user_id`, crediting its points and overwriting the
    /// user's activation marker. `now` is the instant expiry is judged
    /// against.
    async fn redeem(
        &self,
        user_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Redemption, RedemptionError>;
}
