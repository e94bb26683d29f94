//! PostgreSQL-backed `AdminStore` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{AdminStore, AdminStoreError, LedgerStats, MintCodeError};
use crate::domain::{ActivationCode, ActivationCodeDraft};

use super::models::{ActivationCodeRow, NewActivationCodeRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::code_from_row;
use super::schema::{accounts, activation_codes, users};

/// Diesel-backed implementation of the `AdminStore` port.
#[derive(Clone)]
pub struct DieselAdminStore {
    pool: DbPool,
}

impl DieselAdminStore {
    /// Create a new store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_mint_pool_error(error: PoolError) -> MintCodeError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            MintCodeError::connection(message)
        }
    }
}

fn map_mint_diesel_error(error: diesel::result::Error) -> MintCodeError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            MintCodeError::duplicate_code()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            MintCodeError::connection("database connection error")
        }
        other => {
            debug!(error = %other, "code minting failed");
            MintCodeError::query("database error")
        }
    }
}

fn map_stats_pool_error(error: PoolError) -> AdminStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AdminStoreError::connection(message)
        }
    }
}

fn map_stats_diesel_error(error: diesel::result::Error) -> AdminStoreError {
    debug!(error = %error, "stats query failed");
    AdminStoreError::query("database error")
}

#[async_trait]
impl AdminStore for DieselAdminStore {
    async fn mint_code(
        &self,
        draft: &ActivationCodeDraft,
    ) -> Result<ActivationCode, MintCodeError> {
        let mut conn = self.pool.get().await.map_err(map_mint_pool_error)?;

        let row: ActivationCodeRow = diesel::insert_into(activation_codes::table)
            .values(&NewActivationCodeRow {
                id: Uuid::new_v4(),
                code: &draft.code,
                points: draft.points,
                expires_at: draft.expires_at,
            })
            .returning(ActivationCodeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_mint_diesel_error)?;

        Ok(code_from_row(row))
    }

    async fn stats(&self) -> Result<LedgerStats, AdminStoreError> {
        let mut conn = self.pool.get().await.map_err(map_stats_pool_error)?;

        let total_users: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_stats_diesel_error)?;

        let total_accounts: i64 = accounts::table
            .filter(accounts::is_hidden.eq(false))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_stats_diesel_error)?;

        let unused_codes: i64 = activation_codes::table
            .filter(activation_codes::is_used.eq(false))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_stats_diesel_error)?;

        Ok(LedgerStats {
            total_users,
            total_accounts,
            unused_codes,
        })
    }
}
