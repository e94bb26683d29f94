//! Device identifier value object.
//!
//! The device identifier is the sole login credential: an opaque string the
//! client generates once and presents on every request. It is the unique
//! correlation key for a user record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length for a device identifier.
pub const DEVICE_ID_MAX: usize = 32;

/// Validation errors returned by [`DeviceId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceIdValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("device_id must not be empty")]
    Empty,
    /// Identifier exceeds [`DEVICE_ID_MAX`] characters.
    #[error("device_id must be at most {DEVICE_ID_MAX} characters")]
    TooLong,
    /// Identifier carries leading or trailing whitespace.
    #[error("device_id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Opaque client-supplied installation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Validate and construct a [`DeviceId`].
    pub fn new(value: impl Into<String>) -> Result<Self, DeviceIdValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(DeviceIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(DeviceIdValidationError::SurroundingWhitespace);
        }
        if raw.chars().count() > DEVICE_ID_MAX {
            return Err(DeviceIdValidationError::TooLong);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<DeviceId> for String {
    fn from(value: DeviceId) -> Self {
        value.0
    }
}

impl TryFrom<String> for DeviceId {
    type Error = DeviceIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        let id = DeviceId::new("d1-installation").expect("valid device id");
        assert_eq!(id.as_str(), "d1-installation");
    }

    #[rstest]
    #[case("", DeviceIdValidationError::Empty)]
    #[case("   ", DeviceIdValidationError::Empty)]
    #[case(" padded", DeviceIdValidationError::SurroundingWhitespace)]
    #[case("padded ", DeviceIdValidationError::SurroundingWhitespace)]
    fn rejects_malformed_identifiers(
        #[case] raw: &str,
        #[case] expected: DeviceIdValidationError,
    ) {
        assert_eq!(DeviceId::new(raw), Err(expected));
    }

    #[test]
    fn rejects_identifiers_over_the_length_bound() {
        let raw = "x".repeat(DEVICE_ID_MAX + 1);
        assert_eq!(DeviceId::new(raw), Err(DeviceIdValidationError::TooLong));
    }

    #[test]
    fn length_bound_is_inclusive() {
        let raw = "x".repeat(DEVICE_ID_MAX);
        assert!(DeviceId::new(raw).is_ok());
    }
}
