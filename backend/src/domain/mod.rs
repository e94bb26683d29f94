//! Ledger domain: entities, ports, and the services behind the gateway.
//!
//! Purpose: keep every invariant of the entitlement ledger (non-negative
//! balances, single-use codes, exclusive account ownership) behind strongly
//! typed entities and ports. The services here orchestrate ports; the
//! atomic critical sections themselves live in the persistence adapters so
//! multiple server instances stay correct against one database.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failure taxonomy.
//! - [`DeviceId`] — validated client-supplied login credential.
//! - [`User`], [`Account`], [`ActivationCode`] — ledger aggregates.
//! - [`ports`] — driven store traits and driving command traits.
//! - The services implementing the command traits.

pub mod account;
pub mod account_service;
pub mod activation_service;
pub mod admin_service;
pub mod code;
pub mod device;
pub mod error;
pub mod exchange_service;
pub mod identity_service;
pub mod ports;
pub mod user;

pub use self::account::{Account, AccountDraft, AccountSource, CredentialBundle};
pub use self::account_service::AccountService;
pub use self::activation_service::ActivationService;
pub use self::admin_service::AdminService;
pub use self::code::{ActivationCode, ActivationCodeDraft, CODE_MAX, CodeValidationError};
pub use self::device::{DEVICE_ID_MAX, DeviceId, DeviceIdValidationError};
pub use self::error::{Error, ErrorCode, LedgerResult};
pub use self::exchange_service::{ExchangePricing, ExchangeService};
pub use self::identity_service::IdentityService;
pub use self::user::User;
