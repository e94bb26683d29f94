//! PostgreSQL-backed `ActivationLedger` adapter.
//!
//! The redeem-and-credit pair runs in one transaction with the code row
//! locked `FOR UPDATE`. Concurrent redemptions of the same code serialise on
//! that lock; whichever transaction wins sees `is_used = false` and flips
//! it, every later one sees `true` and halts. The point credit commits or
//! rolls back together with the flip, so a code can never fund two users
//! and a crash can never credit without consuming the code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ActivationLedger, Redemption, RedemptionError};

use super::models::ActivationCodeRow;
use super::pool::{DbPool, PoolError};
use super::schema::{activation_codes, users};

/// Diesel-backed implementation of the `ActivationLedger` port.
#[derive(Clone)]
pub struct DieselActivationLedger {
    pool: DbPool,
}

impl DieselActivationLedger {
    /// Create a new ledger over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RedemptionError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RedemptionError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RedemptionError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "redemption transaction failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RedemptionError::connection("database connection error")
        }
        _ => RedemptionError::query("database error"),
    }
}

/// Control flow inside the redemption transaction: either a deliberate halt
/// that rolls the transaction back, or a database failure.
enum RedeemTx {
    Halt(RedemptionError),
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for RedeemTx {
    fn from(error: diesel::result::Error) -> Self {
        Self::Db(error)
    }
}

#[async_trait]
impl ActivationLedger for DieselActivationLedger {
    async fn redeem(
        &self,
        user_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Redemption, RedemptionError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = conn
            .transaction::<Redemption, RedeemTx, _>(|conn| {
                async move {
                    // Lock the code row; concurrent redeemers queue here.
                    let row: Option<ActivationCodeRow> = activation_codes::table
                        .filter(activation_codes::code.eq(code))
                        .select(ActivationCodeRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;

                    let Some(row) = row else {
                        return Err(RedeemTx::Halt(RedemptionError::invalid_or_used()));
                    };
                    if row.is_used {
                        return Err(RedeemTx::Halt(RedemptionError::invalid_or_used()));
                    }
                    if now >= row.expires_at {
                        return Err(RedeemTx::Halt(RedemptionError::expired()));
                    }

                    diesel::update(activation_codes::table.find(row.id))
                        .set((
                            activation_codes::is_used.eq(true),
                            activation_codes::used_by.eq(Some(user_id)),
                        ))
                        .execute(conn)
                        .await?;

                    let new_balance: i32 = diesel::update(users::table.find(user_id))
                        .set((
                            users::points.eq(users::points + row.points),
                            users::activated_code.eq(Some(row.code.clone())),
                            users::activation_expires_at.eq(Some(row.expires_at)),
                        ))
                        .returning(users::points)
                        .get_result(conn)
                        .await?;

                    Ok(Redemption {
                        code: row.code,
                        points_granted: row.points,
                        new_balance,
                        expires_at: row.expires_at,
                    })
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(redemption) => Ok(redemption),
            Err(RedeemTx::Halt(halt)) => Err(halt),
            Err(RedeemTx::Db(error)) => Err(map_diesel_error(error)),
        }
    }
}
