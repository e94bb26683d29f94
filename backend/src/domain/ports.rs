//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (the store traits) describe what the ledger expects from
//! persistence adapters; driving ports (the command traits) describe what
//! the gateway may ask of the ledger. Every store trait exposes strongly
//! typed errors so adapters map their failures into predictable variants.

mod account_pool;
mod activation_ledger;
mod admin_store;
mod commands;
mod exchange_store;
mod macros;
mod user_store;

pub(crate) use macros::define_port_error;

pub use account_pool::{AccountPool, AccountPoolError};
pub use activation_ledger::{ActivationLedger, Redemption, RedemptionError};
pub use admin_store::{AdminStore, AdminStoreError, LedgerStats, MintCodeError};
pub use commands::{
    AccountsCommand, AdminCommand, ExchangeCommand, ExchangeOutcome, IdentityCommand,
    LoginOutcome, LogoutOutcome, MintCodeRequest, RedeemCommand, RedeemOutcome,
};
pub use exchange_store::{ExchangeReceipt, ExchangeStore, ExchangeStoreError};
pub use user_store::{UserStore, UserStoreError};

#[cfg(test)]
pub use account_pool::MockAccountPool;
#[cfg(test)]
pub use activation_ledger::MockActivationLedger;
#[cfg(test)]
pub use admin_store::MockAdminStore;
#[cfg(test)]
pub use commands::{
    MockAccountsCommand, MockAdminCommand, MockExchangeCommand, MockIdentityCommand,
    MockRedeemCommand,
};
#[cfg(test)]
pub use exchange_store::MockExchangeStore;
#[cfg(test)]
pub use user_store::MockUserStore;
