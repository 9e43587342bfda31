//! License check performed by client applications at start and stop.
//!
//! A start is authorized when any rule for the app matches both the
//! reported version and the caller's IP. Only authorized starts are logged;
//! stops are logged unconditionally.

use sqlx::SqlitePool;
use wire::{EventKind, LicenseGrant};

use crate::services::events::{self, EventError};
use crate::services::ip_rule::check_ip;
use crate::services::rules::{self, RuleError};
use crate::services::version_rule::check_version;

#[derive(Debug, thiserror::Error)]
pub enum LicenseError {
    #[error("no authorization rule matches")]
    Unauthorized,
    #[error(transparent)]
    Rules(#[from] RuleError),
    #[error(transparent)]
    Events(#[from] EventError),
}

/// Check a start request and record it when authorized.
pub async fn authorize_start(
    pool: &SqlitePool,
    app: &str,
    version: &str,
    client_ip: &str,
) -> Result<LicenseGrant, LicenseError> {
    let candidates = rules::rules_for_app(pool, app).await?;
    let Some(rule) = candidates
        .into_iter()
        .find(|rule| check_version(version, &rule.version_rule) && check_ip(client_ip, &rule.ip_rule))
    else {
        tracing::info!(app, version, client_ip, "license check refused");
        return Err(LicenseError::Unauthorized);
    };

    events::record_event(pool, app, version, EventKind::Start, client_ip).await?;
    tracing::info!(app, version, client_ip, rule_id = rule.id, "license check granted");
    Ok(LicenseGrant { detail_info: rule.detail_info })
}

/// Record a stop event.
pub async fn record_stop(pool: &SqlitePool, app: &str, version: &str, client_ip: &str) -> Result<(), LicenseError> {
    events::record_event(pool, app, version, EventKind::Stop, client_ip).await?;
    Ok(())
}

#[cfg(test)]
#[path = "license_test.rs"]
mod tests;
