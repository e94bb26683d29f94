//! PostgreSQL-backed `UserStore` adapter.
//!
//! First-contact creation leans on the unique index over `device_id`:
//! insert-or-ignore then re-select, so concurrent first logins from one
//! device converge on a single row without read-then-insert races.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{DeviceId, User};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::user_from_row;
use super::schema::users;

/// Diesel-backed implementation of the `UserStore` port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a new store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "user store operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        _ => UserStoreError::query("database error"),
    }
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn resolve_or_create(&self, device_id: &DeviceId) -> Result<User, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let fresh = NewUserRow {
            id: Uuid::new_v4(),
            device_id: device_id.as_str(),
            points: 0,
        };
        let inserted = diesel::insert_into(users::table)
            .values(&fresh)
            .on_conflict(users::device_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if inserted > 0 {
            debug!(device_id = %device_id, "user created on first contact");
        }

        let row: UserRow = users::table
            .filter(users::device_id.eq(device_id.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        user_from_row(row).map_err(|err| UserStoreError::query(err.to_string()))
    }

    async fn find_by_device_id(
        &self,
        device_id: &DeviceId,
    ) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::device_id.eq(device_id.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(user_from_row)
            .transpose()
            .map_err(|err| UserStoreError::query(err.to_string()))
    }

    async fn clear_activation(&self, device_id: &DeviceId) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let touched = diesel::update(users::table.filter(users::device_id.eq(device_id.as_str())))
            .set((
                users::activated_code.eq(None::<String>),
                users::activation_expires_at.eq(None::<chrono::DateTime<chrono::Utc>>),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(touched > 0)
    }
}
