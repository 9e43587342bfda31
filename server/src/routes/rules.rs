//! Authorization rule management routes.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use wire::{Ack, AuthRule, AuthRuleUpdate, Envelope, NewAuthRule};

use crate::routes::ApiError;
use crate::routes::auth::AdminUser;
use crate::services::rules::{self, RuleError};
use crate::state::AppState;

pub(crate) fn rule_error_to_api(err: RuleError) -> ApiError {
    match err {
        RuleError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, "授权规则不存在"),
        RuleError::Database(_) => ApiError::internal(&err),
    }
}

/// `GET /api/auth/list`: all rules.
pub async fn list_rules(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Envelope<Vec<AuthRule>>>, ApiError> {
    let rules = rules::list_rules(&state.pool).await.map_err(rule_error_to_api)?;
    Ok(Json(Envelope::ok(rules)))
}

/// `GET /api/auth/get/:id`: one rule.
pub async fn get_rule(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<AuthRule>>, ApiError> {
    let rule = rules::get_rule(&state.pool, id).await.map_err(rule_error_to_api)?;
    Ok(Json(Envelope::ok(rule)))
}

/// `POST /api/auth/create`: add a rule.
pub async fn create_rule(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<NewAuthRule>,
) -> Result<Json<Envelope<AuthRule>>, ApiError> {
    tracing::debug!(admin = %admin.claims.username, app = %body.app, "create rule requested");
    let rule = rules::create_rule(&state.pool, &body).await.map_err(rule_error_to_api)?;
    Ok(Json(Envelope::ok(rule)))
}

/// `POST /api/auth/update`: replace a rule's fields by id.
pub async fn update_rule(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<AuthRuleUpdate>,
) -> Result<Json<Envelope<AuthRule>>, ApiError> {
    tracing::debug!(admin = %admin.claims.username, id = body.id, "update rule requested");
    let rule = rules::update_rule(&state.pool, &body).await.map_err(rule_error_to_api)?;
    Ok(Json(Envelope::ok(rule)))
}

/// `DELETE /api/auth/delete/:id`: remove a rule.
pub async fn delete_rule(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ApiError> {
    tracing::debug!(admin = %admin.claims.username, id, "delete rule requested");
    rules::delete_rule(&state.pool, id).await.map_err(rule_error_to_api)?;
    Ok(Json(Ack::ok()))
}
