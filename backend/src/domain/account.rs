//! Pool account aggregate and its source-specific credential bundles.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// External service a pool account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountSource {
    /// Google OAuth credential bundles.
    Google,
    /// GitHub token credential bundles.
    Github,
}

impl AccountSource {
    /// Stable lowercase tag used in storage and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Github => "github",
        }
    }

    /// Parse a stored source tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "google" => Some(Self::Google),
            "github" => Some(Self::Github),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-specific secret material handed to the owning device.
///
/// Serialized untagged so each bundle's fields appear directly in response
/// payloads next to the account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CredentialBundle {
    /// OAuth client credentials for a Google account.
    Google {
        /// Account email address.
        email: String,
        /// Long-lived refresh token.
        refresh_token: String,
        /// Short-lived access token, when one has been minted.
        access_token: Option<String>,
        /// OAuth client identifier.
        client_id: String,
        /// OAuth client secret.
        client_secret: String,
    },
    /// Personal access token credentials for a GitHub account.
    Github {
        /// Account login name.
        username: String,
        /// Personal access token.
        access_token: String,
        /// Public profile location.
        profile_url: String,
    },
}

impl CredentialBundle {
    /// Which source this bundle belongs to.
    pub const fn source(&self) -> AccountSource {
        match self {
            Self::Google { .. } => AccountSource::Google,
            Self::Github { .. } => AccountSource::Github,
        }
    }

    /// Fabricate a placeholder bundle for a freshly allocated account.
    ///
    /// Stands in for a real provisioning pipeline: the shapes match what a
    /// production integration would deliver, the values are synthetic.
    pub fn placeholder(source: AccountSource, now: DateTime<Utc>) -> Self {
        let stamp = now.timestamp_millis();
        let nonce = random_suffix();
        match source {
            AccountSource::Google => Self::Google {
                email: format!("pool{stamp}@example.com"),
                refresh_token: format!("aor_{nonce}{stamp}"),
                access_token: None,
                client_id: format!("client_{nonce}"),
                client_secret: format!("secret_{nonce}{stamp}"),
            },
            AccountSource::Github => Self::Github {
                username: format!("pool-{nonce}"),
                access_token: format!("ghp_{nonce}{stamp}"),
                profile_url: format!("https://github.com/pool-{nonce}"),
            },
        }
    }
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// A credential record exclusively assigned to one user.
///
/// Ownership is immutable once set. Hiding an account removes it from the
/// owner's visible list without deleting the row, so ids are never reused and
/// the audit trail survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning user; never changes after allocation.
    pub user_id: Uuid,
    /// Which external service the credentials belong to.
    pub source: AccountSource,
    /// The secret material handed to the owner.
    pub credentials: CredentialBundle,
    /// Soft-delete flag; hidden accounts stay queryable by id.
    pub is_hidden: bool,
    /// Allocation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A not-yet-persisted account produced by the exchange engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDraft {
    /// Identifier assigned up front so receipts are self-contained.
    pub id: Uuid,
    /// The secret material to persist; fixes the source.
    pub credentials: CredentialBundle,
}

impl AccountDraft {
    /// Draft a placeholder account for the given source.
    pub fn placeholder(source: AccountSource, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            credentials: CredentialBundle::placeholder(source, now),
        }
    }

    /// Which source this draft allocates from.
    pub const fn source(&self) -> AccountSource {
        self.credentials.source()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn source_tags_round_trip() {
        for source in [AccountSource::Google, AccountSource::Github] {
            assert_eq!(AccountSource::from_tag(source.as_str()), Some(source));
        }
        assert_eq!(AccountSource::from_tag("gitlab"), None);
    }

    #[test]
    fn google_bundles_serialize_flat() {
        let bundle = CredentialBundle::Google {
            email: "pool1@example.com".to_owned(),
            refresh_token: "aor_abc".to_owned(),
            access_token: None,
            client_id: "client_abc".to_owned(),
            client_secret: "secret_abc".to_owned(),
        };
        let value = serde_json::to_value(&bundle).expect("bundle serializes");
        assert_eq!(
            value,
            json!({
                "email": "pool1@example.com",
                "refresh_token": "aor_abc",
                "access_token": null,
                "client_id": "client_abc",
                "client_secret": "secret_abc",
            })
        );
    }

    #[test]
    fn placeholder_bundles_match_their_source() {
        let now = Utc::now();
        let google = CredentialBundle::placeholder(AccountSource::Google, now);
        assert_eq!(google.source(), AccountSource::Google);
        let CredentialBundle::Google { email, .. } = google else {
            panic!("expected a google bundle");
        };
        assert!(email.ends_with("@example.com"));

        let github = CredentialBundle::placeholder(AccountSource::Github, now);
        assert_eq!(github.source(), AccountSource::Github);
        let CredentialBundle::Github { access_token, .. } = github else {
            panic!("expected a github bundle");
        };
        assert!(access_token.starts_with("ghp_"));
    }

    #[test]
    fn drafts_carry_distinct_ids() {
        let now = Utc::now();
        let a = AccountDraft::placeholder(AccountSource::Google, now);
        let b = AccountDraft::placeholder(AccountSource::Google, now);
        assert_ne!(a.id, b.id);
        assert_eq!(a.source(), AccountSource::Google);
    }
}
