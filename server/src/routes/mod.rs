//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the admin API (bearer-authenticated), the license check
//! endpoints called by client applications, and optionally the static admin
//! console assets under a single Axum router.

pub mod auth;
pub mod events;
pub mod license;
pub mod rules;
#[cfg(test)]
pub(crate) mod test_support;

use std::fmt::Display;
use std::path::Path;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use wire::ErrorBody;

use crate::state::AppState;

// =============================================================================
// ERRORS
// =============================================================================

/// Error response: a status code plus a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, body: ErrorBody::message(detail) }
    }

    /// Log the cause and hide it behind a generic 500.
    pub fn internal(err: &impl Display) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// API routes shared by the admin console and licensed applications.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/auth/list", get(rules::list_rules))
        .route("/api/auth/get/{id}", get(rules::get_rule))
        .route("/api/auth/create", post(rules::create_rule))
        .route("/api/auth/update", post(rules::update_rule))
        .route("/api/auth/delete/{id}", delete(rules::delete_rule))
        .route("/api/events", get(events::list_events))
        .route("/api/stats", get(events::stats))
        .route("/api/event/start", get(license::start))
        .route("/api/event/stop", get(license::stop))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application router.
///
/// With `static_dir` set, `/` serves its `index.html` and `/static/*` its
/// files, so the browser console can be hosted alongside the API.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = api_routes(state);
    if let Some(dir) = static_dir {
        router = router
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .nest_service("/static", ServeDir::new(dir));
    }
    router.layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
