//! Runtime configuration loaded from the environment.
//!
//! DESIGN
//! ======
//! Every setting has a default so a bare `authgate-server` starts against a
//! local `app.db`. Defaults for the JWT secret and admin password are only
//! suitable for development; startup logs a warning when they are in use.

use std::path::PathBuf;

use chrono::TimeDelta;

const DEFAULT_DATABASE_URL: &str = "sqlite://app.db?mode=rwc";
const DEFAULT_PORT: u16 = 7389;
const DEFAULT_JWT_SECRET: &str = "your-secret-key";
const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;
/// Ten years; keeps `now + ttl` far inside chrono's representable range.
const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 366 * 10;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Administrator credentials accepted by `POST /api/login`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub admin: AdminCredentials,
    /// Directory holding `index.html` and static assets, if served.
    pub static_dir: Option<PathBuf>,
    pub db_max_connections: u32,
}

impl Config {
    /// Load from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but unparseable, or if
    /// the token lifetime is not between one hour and ten years.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &str, default: &str| lookup(key).filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_owned());

        Ok(Self {
            database_url: text("DATABASE_URL", DEFAULT_DATABASE_URL),
            port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
            jwt_secret: text("JWT_SECRET", DEFAULT_JWT_SECRET),
            jwt_expiration_hours: expiration_hours(&lookup)?,
            admin: AdminCredentials {
                username: text("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
                password: text("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
            },
            static_dir: lookup("STATIC_DIR").filter(|v| !v.is_empty()).map(PathBuf::from),
            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
        })
    }

    /// Token lifetime as a duration.
    #[must_use]
    pub fn jwt_ttl(&self) -> TimeDelta {
        TimeDelta::try_hours(self.jwt_expiration_hours).unwrap_or(TimeDelta::hours(DEFAULT_JWT_EXPIRATION_HOURS))
    }

    /// Log warnings for development-only defaults still in effect.
    pub fn warn_on_insecure_defaults(&self) {
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            tracing::warn!("JWT_SECRET not set; using the built-in development secret");
        }
        if self.admin.password == DEFAULT_ADMIN_PASSWORD {
            tracing::warn!(username = %self.admin.username, "ADMIN_PASSWORD not set; using the default password");
        }
    }
}

/// `JWT_EXPIRATION_HOURS` must be positive and at most ten years.
fn expiration_hours(lookup: &impl Fn(&str) -> Option<String>) -> Result<i64, ConfigError> {
    let key = "JWT_EXPIRATION_HOURS";
    let hours = parse_var(lookup, key, DEFAULT_JWT_EXPIRATION_HOURS)?;
    if (1..=MAX_JWT_EXPIRATION_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(ConfigError::Invalid { key, value: hours.to_string() })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
