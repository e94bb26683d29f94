//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversions to domain types live next to the adapters that use
//! them.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{AccountDraft, CredentialBundle};

use super::schema::{accounts, activation_codes, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub device_id: String,
    pub points: i32,
    pub activated_code: Option<String>,
    pub activation_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for first-contact user creation.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub device_id: &'a str,
    pub points: i32,
}

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub source: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub profile_url: Option<String>,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for account allocation.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub source: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub profile_url: Option<String>,
}

impl NewAccountRow {
    /// Spread a drafted credential bundle over the nullable columns.
    pub(crate) fn from_draft(user_id: Uuid, draft: AccountDraft) -> Self {
        let source = draft.source().as_str().to_owned();
        let mut row = Self {
            id: draft.id,
            user_id,
            source,
            email: None,
            username: None,
            refresh_token: None,
            access_token: None,
            client_id: None,
            client_secret: None,
            profile_url: None,
        };
        match draft.credentials {
            CredentialBundle::Google {
                email,
                refresh_token,
                access_token,
                client_id,
                client_secret,
            } => {
                row.email = Some(email);
                row.refresh_token = Some(refresh_token);
                row.access_token = access_token;
                row.client_id = Some(client_id);
                row.client_secret = Some(client_secret);
            }
            CredentialBundle::Github {
                username,
                access_token,
                profile_url,
            } => {
                row.username = Some(username);
                row.access_token = Some(access_token);
                row.profile_url = Some(profile_url);
            }
        }
        row
    }
}

/// Row struct for reading from the activation_codes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = activation_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ActivationCodeRow {
    pub id: Uuid,
    pub code: String,
    pub points: i32,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
    pub used_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for code minting.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activation_codes)]
pub(crate) struct NewActivationCodeRow<'a> {
    pub id: Uuid,
    pub code: &'a str,
    pub points: i32,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::AccountSource;

    #[test]
    fn google_drafts_fill_the_oauth_columns() {
        let draft = AccountDraft::placeholder(AccountSource::Google, Utc::now());
        let row = NewAccountRow::from_draft(Uuid::new_v4(), draft);
        assert_eq!(row.source, "google");
        assert!(row.email.is_some());
        assert!(row.refresh_token.is_some());
        assert!(row.client_secret.is_some());
        assert!(row.username.is_none());
        assert!(row.profile_url.is_none());
    }

    #[test]
    fn github_drafts_fill_the_token_columns() {
        let draft = AccountDraft::placeholder(AccountSource::Github, Utc::now());
        let row = NewAccountRow::from_draft(Uuid::new_v4(), draft);
        assert_eq!(row.source, "github");
        assert!(row.username.is_some());
        assert!(row.access_token.is_some());
        assert!(row.profile_url.is_some());
        assert!(row.email.is_none());
        assert!(row.client_id.is_none());
    }
}
