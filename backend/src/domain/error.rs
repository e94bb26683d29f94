//! Domain-level error type.
//!
//! Transport agnostic: the HTTP adapter turns these into response envelopes,
//! and nothing in this module knows about status codes or JSON.

use std::fmt;

/// Stable machine-readable code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A required field is missing or malformed.
    InvalidInput,
    /// The device has never logged in.
    UserNotFound,
    /// The account does not exist or is not owned by the caller.
    AccountNotFound,
    /// The activation code does not exist or was already redeemed.
    CodeInvalidOrUsed,
    /// The activation code's validity window has passed.
    CodeExpired,
    /// The balance does not cover the exchange price.
    InsufficientPoints,
    /// The admin token is missing or does not match.
    Unauthorized,
    /// The persistent store cannot be reached.
    StoreUnavailable,
    /// An unexpected failure inside the ledger.
    Internal,
}

/// Ledger failure carrying a category and a human-readable message.
///
/// ## Invariants
/// - `message` is non-empty; constructors take care of this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.trim().is_empty(), "error message must not be empty");
        Self { code, message }
    }

    /// A required field is missing or malformed.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// The device has never logged in.
    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, "user not found")
    }

    /// The account does not exist or is not owned by the caller.
    pub fn account_not_found() -> Self {
        Self::new(ErrorCode::AccountNotFound, "account not found")
    }

    /// The activation code does not exist or was already redeemed.
    pub fn code_invalid_or_used() -> Self {
        Self::new(ErrorCode::CodeInvalidOrUsed, "activation code is invalid or already used")
    }

    /// The activation code's validity window has passed.
    pub fn code_expired() -> Self {
        Self::new(ErrorCode::CodeExpired, "activation code has expired")
    }

    /// The balance does not cover the exchange price.
    pub fn insufficient_points(price: i32) -> Self {
        Self::new(
            ErrorCode::InsufficientPoints,
            format!("insufficient points: {price} required"),
        )
    }

    /// The admin token is missing or does not match.
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::Unauthorized, "permission denied")
    }

    /// The persistent store cannot be reached.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }

    /// An unexpected failure inside the ledger.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Stable machine-readable failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message for the response envelope.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// Convenient result alias for ledger operations.
pub type LedgerResult<T> = Result<T, Error>;
