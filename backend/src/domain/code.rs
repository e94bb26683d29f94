//! Activation code aggregate: a one-time token redeemable for points.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum accepted length for a code string.
pub const CODE_MAX: usize = 50;

/// A one-time activation code.
///
/// The `is_used` flag flips false to true exactly once, atomically with the
/// point credit to the redeeming user; `used_by` records that attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationCode {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique redeemable token string.
    pub code: String,
    /// Points credited on redemption.
    pub points: i32,
    /// End of the validity window.
    pub expires_at: DateTime<Utc>,
    /// Whether the code has been redeemed.
    pub is_used: bool,
    /// User credited by the redemption, once used.
    pub used_by: Option<Uuid>,
    /// Minting timestamp.
    pub created_at: DateTime<Utc>,
}

/// Validation errors returned by [`ActivationCodeDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeValidationError {
    /// Code string is empty after trimming whitespace.
    #[error("code must not be empty")]
    EmptyCode,
    /// Code string exceeds [`CODE_MAX`] characters.
    #[error("code must be at most {CODE_MAX} characters")]
    CodeTooLong,
    /// Point value is zero or negative.
    #[error("points must be positive")]
    NonPositivePoints,
}

/// A validated, not-yet-minted activation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationCodeDraft {
    /// Unique redeemable token string.
    pub code: String,
    /// Points credited on redemption.
    pub points: i32,
    /// End of the validity window.
    pub expires_at: DateTime<Utc>,
}

impl ActivationCodeDraft {
    /// Validate and construct a draft for minting.
    pub fn new(
        code: impl Into<String>,
        points: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, CodeValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(CodeValidationError::EmptyCode);
        }
        if code.chars().count() > CODE_MAX {
            return Err(CodeValidationError::CodeTooLong);
        }
        if points <= 0 {
            return Err(CodeValidationError::NonPositivePoints);
        }
        Ok(Self {
            code,
            points,
            expires_at,
        })
    }
}
