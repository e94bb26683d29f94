//! Driving ports: the use-cases the gateway invokes.
//!
//! HTTP handlers depend on these traits only, so they stay testable without
//! a database and the services behind them can be swapped wholesale.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Account, AccountSource, ActivationCode, DeviceId, Error};

use super::admin_store::LedgerStats;

/// Result of resolving a device identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// The resolved (or freshly created) user.
    pub user: crate::domain::User,
    /// The user's visible accounts, newest first.
    pub accounts: Vec<Account>,
}

/// Result of clearing a device's activation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Whether a user record was actually touched.
    pub cleared: bool,
}

/// Resolve a device to a user record and clear its activation display state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityCommand: Send + Sync {
    /// Resolve-or-create the user for a device and collect its visible
    /// accounts. Idempotent: repeat calls return the same user.
    async fn login(&self, device_id: &DeviceId) -> Result<LoginOutcome, Error>;

    /// Clear the activation marker. Balance and accounts are untouched;
    /// unknown devices are a successful no-op.
    async fn logout(&self, device_id: &DeviceId) -> Result<LogoutOutcome, Error>;
}

/// Result of a successful code redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemOutcome {
    /// Balance after the credit.
    pub current_points: i32,
    /// Expiry of the redeemed code.
    pub expires_at: DateTime<Utc>,
    /// The user's visible accounts, newest first.
    pub accounts: Vec<Account>,
}

/// Redeem a one-time activation code for points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedeemCommand: Send + Sync {
    /// Credit the code's points to the device's user and mark the code
    /// used, atomically.
    async fn redeem(&self, device_id: &DeviceId, code: &str) -> Result<RedeemOutcome, Error>;
}

/// Result of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOutcome {
    /// The freshly allocated account.
    pub account: Account,
    /// Balance left after the debit.
    pub remaining_points: i32,
}

/// Spend points to obtain an exclusive-use pool account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeCommand: Send + Sync {
    /// Debit the configured price and allocate one account of `source`.
    async fn exchange(
        &self,
        device_id: &DeviceId,
        source: AccountSource,
    ) -> Result<ExchangeOutcome, Error>;
}

/// Read credentials of owned accounts and soft-delete them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// The credential bundle of an owned account, optionally constrained to
    /// one source.
    async fn credentials(
        &self,
        device_id: &DeviceId,
        account_id: Uuid,
        source: Option<AccountSource>,
    ) -> Result<Account, Error>;

    /// Hide an owned account from the visible list. Hiding an account the
    /// caller does not own is a silent no-op.
    async fn hide(&self, device_id: &DeviceId, account_id: Uuid) -> Result<(), Error>;
}

/// Fields accepted when minting an activation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCodeRequest {
    /// Unique redeemable token string.
    pub code: String,
    /// Points credited on redemption.
    pub points: i32,
    /// Validity window in days from now.
    pub expire_days: i64,
}

/// Administrative code minting and reporting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminCommand: Send + Sync {
    /// Mint a new one-time code valid for `expire_days` from now.
    async fn mint_code(&self, request: MintCodeRequest) -> Result<ActivationCode, Error>;

    /// Current ledger counts.
    async fn stats(&self) -> Result<LedgerStats, Error>;
}
