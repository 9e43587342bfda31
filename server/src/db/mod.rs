//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to open the shared SQLite pool and apply schema
//! migrations before accepting API traffic.

use std::str::FromStr;

use chrono::{NaiveDateTime, SubsecRound, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Initialize the SQLite connection pool and run migrations.
///
/// The database file is created if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the URL is invalid, or the connection or migrations fail.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}

/// Current UTC time at whole-second precision, as stored in `created_at`.
#[must_use]
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

/// Single-connection in-memory database for tests.
///
/// Every connection to `sqlite::memory:` opens a fresh database, so the pool
/// is pinned to one connection that never expires.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").expect("memory url");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("connect in-memory sqlite");
    sqlx::migrate!("src/db/migrations").run(&pool).await.expect("migrations");
    pool
}
