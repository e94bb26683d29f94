//! Request-field validation shared by the HTTP handlers.
//!
//! Request DTOs declare every field optional so that missing fields produce
//! the ledger's own `InvalidInput` failure instead of a framework
//! deserialization error.

use uuid::Uuid;

use crate::domain::{DeviceId, Error};

/// Validate the `device_id` field.
pub fn require_device_id(raw: Option<String>) -> Result<DeviceId, Error> {
    let raw = raw.ok_or_else(|| Error::invalid_input("device_id is required"))?;
    DeviceId::new(raw).map_err(|err| Error::invalid_input(err.to_string()))
}

/// Validate the `account_id` field.
pub fn require_account_id(raw: Option<String>) -> Result<Uuid, Error> {
    let raw = raw.ok_or_else(|| Error::invalid_input("account_id is required"))?;
    Uuid::parse_str(&raw).map_err(|_| Error::invalid_input("account_id must be a valid UUID"))
}

/// Validate the `code` field.
pub fn require_code(raw: Option<String>) -> Result<String, Error> {
    let raw = raw.ok_or_else(|| Error::invalid_input("code is required"))?;
    if raw.trim().is_empty() {
        return Err(Error::invalid_input("code is required"));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn device_ids_pass_through_validation() {
        let id = require_device_id(Some("d1".to_owned())).expect("valid device id");
        assert_eq!(id.as_str(), "d1");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some(" spaced ".to_owned()))]
    fn bad_device_ids_become_invalid_input(#[case] raw: Option<String>) {
        let error = require_device_id(raw).expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidInput);
    }

    #[test]
    fn account_ids_must_be_uuids() {
        assert!(require_account_id(Some(Uuid::new_v4().to_string())).is_ok());
        let error = require_account_id(Some("42".to_owned())).expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidInput);
        assert!(require_account_id(None).is_err());
    }

    #[test]
    fn codes_must_be_non_empty() {
        assert_eq!(require_code(Some("X1".to_owned())).as_deref(), Ok("X1"));
        assert!(require_code(Some("   ".to_owned())).is_err());
        assert!(require_code(None).is_err());
    }
}
