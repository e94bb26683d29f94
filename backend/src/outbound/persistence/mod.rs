//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's store ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` pooling.
//!
//! The adapters are thin: they translate rows to domain types and map
//! database failures to port errors. What is NOT thin is their concurrency
//! duty. The critical sections (code redemption, the debit/allocate pair)
//! run here as row-locked or conditional single-statement transactions, so
//! correctness holds across any number of server processes.

mod diesel_account_pool;
mod diesel_activation_ledger;
mod diesel_admin_store;
mod diesel_exchange_store;
mod diesel_user_store;
mod models;
mod pool;
mod row_mapping;
mod schema;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use diesel_account_pool::DieselAccountPool;
pub use diesel_activation_ledger::DieselActivationLedger;
pub use diesel_admin_store::DieselAdminStore;
pub use diesel_exchange_store::DieselExchangeStore;
pub use diesel_user_store::DieselUserStore;
pub use pool::{DbPool, PoolConfig, PoolError};

/// Migrations compiled into the binary and applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending migrations over a blocking connection.
///
/// Runs on a blocking thread at startup; a failure here is fatal because
/// there is nothing useful to serve without the schema.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, String> {
    use diesel::{Connection as _, PgConnection};
    use diesel_migrations::MigrationHarness;

    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| format!("database connection failed: {err}"))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migrations failed: {err}"))?;
    Ok(applied.len())
}
