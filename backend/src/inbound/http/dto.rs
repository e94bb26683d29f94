//! Shared response payload shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Account, AccountSource, CredentialBundle, User};

/// One visible account in a listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountDto {
    /// Account identifier, used for token reads and hiding.
    pub id: Uuid,
    /// Which external service the credentials belong to.
    pub source: AccountSource,
    /// The credential bundle's fields, flattened next to the id.
    #[serde(flatten)]
    pub credentials: CredentialBundle,
    /// Allocation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            source: account.source,
            credentials: account.credentials,
            created_at: account.created_at,
        }
    }
}

/// Display marker for the most recently redeemed code.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivatedCodeDto {
    /// The redeemed code string.
    pub code: String,
    /// When the code's validity window ends.
    pub expire_at: DateTime<Utc>,
}

impl ActivatedCodeDto {
    /// Build the marker from a user record, when one is present.
    pub fn from_user(user: &User) -> Option<Self> {
        match (&user.activated_code, user.activation_expires_at) {
            (Some(code), Some(expire_at)) => Some(Self {
                code: code.clone(),
                expire_at,
            }),
            _ => None,
        }
    }
}
