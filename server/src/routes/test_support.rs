//! Router test helpers: in-memory state and one-shot request plumbing.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::AdminCredentials;
use crate::db;
use crate::services::token::TokenKeys;
use crate::state::AppState;

pub const SECRET: &str = "test-secret";

pub async fn test_state() -> AppState {
    AppState::new(
        db::memory_pool().await,
        TokenKeys::new(SECRET, Duration::hours(1)),
        AdminCredentials { username: "admin".to_owned(), password: "pw".to_owned() },
    )
}

pub fn bearer(state: &AppState) -> String {
    format!("Bearer {}", state.tokens.issue("admin").expect("issue token"))
}

/// Send one request and return the status plus the JSON body (`Null` when empty or not JSON).
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("build request");

    let response = router.clone().oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("read body").to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
