//! PostgreSQL-backed `AccountPool` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{AccountPool, AccountPoolError};
use crate::domain::{Account, AccountSource};

use super::models::AccountRow;
use super::pool::{DbPool, PoolError};
use super::row_mapping::account_from_row;
use super::schema::accounts;

/// Diesel-backed implementation of the `AccountPool` port.
#[derive(Clone)]
pub struct DieselAccountPool {
    pool: DbPool,
}

impl DieselAccountPool {
    /// Create a new pool adapter over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountPoolError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountPoolError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> AccountPoolError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "account pool operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountPoolError::connection("database connection error")
        }
        _ => AccountPoolError::query("database error"),
    }
}

fn map_mapping_error(error: super::row_mapping::RowMappingError) -> AccountPoolError {
    AccountPoolError::query(error.to_string())
}

#[async_trait]
impl AccountPool for DieselAccountPool {
    async fn list_visible(&self, user_id: Uuid) -> Result<Vec<Account>, AccountPoolError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AccountRow> = accounts::table
            .filter(accounts::user_id.eq(user_id))
            .filter(accounts::is_hidden.eq(false))
            .order((accounts::created_at.desc(), accounts::id.desc()))
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| account_from_row(row).map_err(map_mapping_error))
            .collect()
    }

    async fn find_owned(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        source: Option<AccountSource>,
    ) -> Result<Option<Account>, AccountPoolError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = accounts::table
            .filter(accounts::id.eq(account_id))
            .filter(accounts::user_id.eq(user_id))
            .into_boxed();
        if let Some(source) = source {
            query = query.filter(accounts::source.eq(source.as_str()));
        }

        let row: Option<AccountRow> = query
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|found| account_from_row(found).map_err(map_mapping_error))
            .transpose()
    }

    async fn hide(&self, user_id: Uuid, account_id: Uuid) -> Result<bool, AccountPoolError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Ownership is part of the predicate, so hiding someone else's
        // account touches zero rows.
        let touched = diesel::update(
            accounts::table
                .filter(accounts::id.eq(account_id))
                .filter(accounts::user_id.eq(user_id)),
        )
        .set(accounts::is_hidden.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(touched > 0)
    }
}
