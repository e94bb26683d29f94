//! Diesel table definitions for the ledger schema.
//!
//! These must match the migrations exactly; regenerate with
//! `diesel print-schema` after schema changes.

diesel::table! {
    /// Per-device ledger records.
    users (id) {
        /// Primary key: UUID v4 generated at insert time.
        id -> Uuid,
        /// Unique client-supplied correlation key (max 32 characters).
        device_id -> Varchar,
        /// Point balance; a CHECK constraint keeps it non-negative.
        points -> Int4,
        /// Most recently redeemed code string, if any.
        activated_code -> Nullable<Varchar>,
        /// Expiry of the most recently redeemed code.
        activation_expires_at -> Nullable<Timestamptz>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Allocated pool accounts; rows are hidden, never deleted.
    accounts (id) {
        /// Primary key: UUID v4 generated at allocation time.
        id -> Uuid,
        /// Owning user; immutable once set.
        user_id -> Uuid,
        /// Source tag: `google` or `github`.
        source -> Varchar,
        /// Google bundle: account email address.
        email -> Nullable<Text>,
        /// Reserved for sources that ship password credentials.
        password -> Nullable<Text>,
        /// GitHub bundle: account login name.
        username -> Nullable<Text>,
        /// Google bundle: long-lived refresh token.
        refresh_token -> Nullable<Text>,
        /// Short-lived access token, when one has been minted.
        access_token -> Nullable<Text>,
        /// Google bundle: OAuth client identifier.
        client_id -> Nullable<Text>,
        /// Google bundle: OAuth client secret.
        client_secret -> Nullable<Text>,
        /// GitHub bundle: public profile location.
        profile_url -> Nullable<Text>,
        /// Soft-delete flag.
        is_hidden -> Bool,
        /// Allocation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One-time activation codes.
    activation_codes (id) {
        /// Primary key: UUID v4 generated at mint time.
        id -> Uuid,
        /// Unique redeemable token string (max 50 characters).
        code -> Varchar,
        /// Points credited on redemption.
        points -> Int4,
        /// End of the validity window.
        expires_at -> Timestamptz,
        /// One-shot flag; flips exactly once.
        is_used -> Bool,
        /// User credited by the redemption.
        used_by -> Nullable<Uuid>,
        /// Minting timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(accounts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, activation_codes, users);
