//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool, the token keys, and the admin credentials.
//! Handlers are otherwise stateless.

use sqlx::SqlitePool;

use crate::config::{AdminCredentials, Config};
use crate::services::token::TokenKeys;

/// Clone is required by Axum; the pool is reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: TokenKeys,
    pub admin: AdminCredentials,
}

impl AppState {
    #[must_use]
    pub fn new(pool: SqlitePool, tokens: TokenKeys, admin: AdminCredentials) -> Self {
        Self { pool, tokens, admin }
    }

    #[must_use]
    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        let tokens = TokenKeys::new(&config.jwt_secret, config.jwt_ttl());
        Self::new(pool, tokens, config.admin.clone())
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
