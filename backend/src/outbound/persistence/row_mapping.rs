//! Conversions from Diesel rows to domain types.
//!
//! Account rows spread their credential bundle over nullable columns, so
//! conversion can fail on rows that violate the per-source column contract.
//! Such rows are reported as mapping errors and surface as query failures.

use crate::domain::{
    Account, AccountSource, ActivationCode, CredentialBundle, DeviceId, User,
};

use super::models::{AccountRow, ActivationCodeRow, UserRow};

/// A persisted row that does not satisfy the domain's invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row mapping failed: {message}")]
pub(crate) struct RowMappingError {
    pub message: String,
}

impl RowMappingError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub(crate) fn user_from_row(row: UserRow) -> Result<User, RowMappingError> {
    let device_id = DeviceId::new(row.device_id)
        .map_err(|err| RowMappingError::new(format!("user {}: {err}", row.id)))?;
    Ok(User {
        id: row.id,
        device_id,
        points: row.points,
        activated_code: row.activated_code,
        activation_expires_at: row.activation_expires_at,
        created_at: row.created_at,
    })
}

pub(crate) fn account_from_row(row: AccountRow) -> Result<Account, RowMappingError> {
    let source = AccountSource::from_tag(&row.source).ok_or_else(|| {
        RowMappingError::new(format!("account {}: unknown source {}", row.id, row.source))
    })?;

    let missing = |column: &str| {
        RowMappingError::new(format!("account {}: missing {column} column", row.id))
    };

    let credentials = match source {
        AccountSource::Google => CredentialBundle::Google {
            email: row.email.ok_or_else(|| missing("email"))?,
            refresh_token: row.refresh_token.ok_or_else(|| missing("refresh_token"))?,
            access_token: row.access_token,
            client_id: row.client_id.ok_or_else(|| missing("client_id"))?,
            client_secret: row.client_secret.ok_or_else(|| missing("client_secret"))?,
        },
        AccountSource::Github => CredentialBundle::Github {
            username: row.username.ok_or_else(|| missing("username"))?,
            access_token: row.access_token.ok_or_else(|| missing("access_token"))?,
            profile_url: row.profile_url.ok_or_else(|| missing("profile_url"))?,
        },
    };

    Ok(Account {
        id: row.id,
        user_id: row.user_id,
        source,
        credentials,
        is_hidden: row.is_hidden,
        created_at: row.created_at,
    })
}

pub(crate) fn code_from_row(row: ActivationCodeRow) -> ActivationCode {
    ActivationCode {
        id: row.id,
        code: row.code,
        points: row.points,
        expires_at: row.expires_at,
        is_used: row.is_used,
        used_by: row.used_by,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn google_row() -> AccountRow {
        AccountRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            source: "google".to_owned(),
            email: Some("pool1@example.com".to_owned()),
            password: None,
            username: None,
            refresh_token: Some("aor_abc".to_owned()),
            access_token: None,
            client_id: Some("client_abc".to_owned()),
            client_secret: Some("secret_abc".to_owned()),
            profile_url: None,
            is_hidden: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn complete_google_rows_convert() {
        let account = account_from_row(google_row()).expect("row converts");
        assert_eq!(account.source, AccountSource::Google);
    }

    #[test]
    fn unknown_source_tags_are_rejected() {
        let mut row = google_row();
        row.source = "gitlab".to_owned();
        let error = account_from_row(row).expect_err("unknown tag rejected");
        assert!(error.message.contains("unknown source"));
    }

    #[test]
    fn missing_bundle_columns_are_rejected() {
        let mut row = google_row();
        row.refresh_token = None;
        let error = account_from_row(row).expect_err("incomplete row rejected");
        assert!(error.message.contains("refresh_token"));
    }

    #[test]
    fn over_long_device_ids_are_rejected() {
        let row = UserRow {
            id: Uuid::new_v4(),
            device_id: "x".repeat(64),
            points: 0,
            activated_code: None,
            activation_expires_at: None,
            created_at: Utc::now(),
        };
        assert!(user_from_row(row).is_err());
    }
}
