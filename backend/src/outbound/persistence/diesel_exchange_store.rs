//! PostgreSQL-backed `ExchangeStore` adapter.
//!
//! The debit is a single conditional `UPDATE .. WHERE points >= price`
//! statement: of two requests racing over one price's worth of points,
//! exactly one matches the row. The account insert shares the transaction,
//! so the pair commits or rolls back as a unit across server instances.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::AccountDraft;
use crate::domain::ports::{ExchangeReceipt, ExchangeStore, ExchangeStoreError};

use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::account_from_row;
use super::schema::{accounts, users};

/// Diesel-backed implementation of the `ExchangeStore` port.
#[derive(Clone)]
pub struct DieselExchangeStore {
    pool: DbPool,
}

impl DieselExchangeStore {
    /// Create a new store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExchangeStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ExchangeStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ExchangeStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "exchange transaction failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ExchangeStoreError::connection("database connection error")
        }
        _ => ExchangeStoreError::query("database error"),
    }
}

/// Control flow inside the exchange transaction.
enum ExchangeTx {
    InsufficientPoints,
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for ExchangeTx {
    fn from(error: diesel::result::Error) -> Self {
        Self::Db(error)
    }
}

#[async_trait]
impl ExchangeStore for DieselExchangeStore {
    async fn debit_and_allocate(
        &self,
        user_id: Uuid,
        price: i32,
        draft: AccountDraft,
    ) -> Result<ExchangeReceipt, ExchangeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewAccountRow::from_draft(user_id, draft);

        let result = conn
            .transaction::<(AccountRow, i32), ExchangeTx, _>(|conn| {
                async move {
                    // Conditional debit: matches only while the balance
                    // covers the price.
                    let remaining: Option<i32> = diesel::update(
                        users::table
                            .filter(users::id.eq(user_id))
                            .filter(users::points.ge(price)),
                    )
                    .set(users::points.eq(users::points - price))
                    .returning(users::points)
                    .get_result(conn)
                    .await
                    .optional()?;

                    let Some(remaining) = remaining else {
                        return Err(ExchangeTx::InsufficientPoints);
                    };

                    let row: AccountRow = diesel::insert_into(accounts::table)
                        .values(&new_row)
                        .returning(AccountRow::as_returning())
                        .get_result(conn)
                        .await?;

                    Ok((row, remaining))
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok((row, remaining_points)) => {
                let account = account_from_row(row)
                    .map_err(|err| ExchangeStoreError::query(err.to_string()))?;
                Ok(ExchangeReceipt {
                    account,
                    remaining_points,
                })
            }
            Err(ExchangeTx::InsufficientPoints) => Err(ExchangeStoreError::insufficient_points()),
            Err(ExchangeTx::Db(error)) => Err(map_diesel_error(error)),
        }
    }
}
