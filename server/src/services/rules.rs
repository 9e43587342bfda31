//! Authorization rule CRUD.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use wire::{AuthRule, AuthRuleUpdate, NewAuthRule};

use crate::db;

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("rule not found: {0}")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const RULE_COLUMNS: &str = "id, app, version_rule, ip_rule, detail_info, created_at";

fn rule_from_row(row: &SqliteRow) -> Result<AuthRule, sqlx::Error> {
    Ok(AuthRule {
        id: row.try_get("id")?,
        app: row.try_get("app")?,
        version_rule: row.try_get("version_rule")?,
        ip_rule: row.try_get("ip_rule")?,
        detail_info: row.try_get("detail_info")?,
        created_at: row.try_get("created_at")?,
    })
}

/// All rules in creation order.
pub async fn list_rules(pool: &SqlitePool) -> Result<Vec<AuthRule>, RuleError> {
    let rows = sqlx::query(&format!("SELECT {RULE_COLUMNS} FROM authorizations ORDER BY id"))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(rule_from_row).collect::<Result<_, _>>()?)
}

pub async fn get_rule(pool: &SqlitePool, id: i64) -> Result<AuthRule, RuleError> {
    let row = sqlx::query(&format!("SELECT {RULE_COLUMNS} FROM authorizations WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RuleError::NotFound(id))?;
    Ok(rule_from_row(&row)?)
}

/// Rules for one app in creation order; the license check tries them in this order.
pub async fn rules_for_app(pool: &SqlitePool, app: &str) -> Result<Vec<AuthRule>, RuleError> {
    let rows = sqlx::query(&format!("SELECT {RULE_COLUMNS} FROM authorizations WHERE app = ? ORDER BY id"))
        .bind(app)
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(rule_from_row).collect::<Result<_, _>>()?)
}

pub async fn create_rule(pool: &SqlitePool, rule: &NewAuthRule) -> Result<AuthRule, RuleError> {
    let row = sqlx::query(&format!(
        "INSERT INTO authorizations (app, version_rule, ip_rule, detail_info, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {RULE_COLUMNS}"
    ))
    .bind(&rule.app)
    .bind(&rule.version_rule)
    .bind(&rule.ip_rule)
    .bind(&rule.detail_info)
    .bind(db::now())
    .fetch_one(pool)
    .await?;

    let created = rule_from_row(&row)?;
    tracing::info!(id = created.id, app = %created.app, "authorization rule created");
    Ok(created)
}

/// Overwrite every editable field of an existing rule.
pub async fn update_rule(pool: &SqlitePool, rule: &AuthRuleUpdate) -> Result<AuthRule, RuleError> {
    let row = sqlx::query(&format!(
        "UPDATE authorizations
         SET app = ?, version_rule = ?, ip_rule = ?, detail_info = ?
         WHERE id = ?
         RETURNING {RULE_COLUMNS}"
    ))
    .bind(&rule.app)
    .bind(&rule.version_rule)
    .bind(&rule.ip_rule)
    .bind(&rule.detail_info)
    .bind(rule.id)
    .fetch_optional(pool)
    .await?
    .ok_or(RuleError::NotFound(rule.id))?;

    tracing::info!(id = rule.id, app = %rule.app, "authorization rule updated");
    Ok(rule_from_row(&row)?)
}

pub async fn delete_rule(pool: &SqlitePool, id: i64) -> Result<(), RuleError> {
    let result = sqlx::query("DELETE FROM authorizations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RuleError::NotFound(id));
    }

    tracing::info!(id, "authorization rule deleted");
    Ok(())
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
