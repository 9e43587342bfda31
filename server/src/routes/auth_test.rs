use axum::http::Method;
use serde_json::json;

use super::*;
use crate::routes::test_support::{SECRET, bearer, send, test_state};
use crate::services::token::TokenKeys;

#[tokio::test]
async fn login_with_valid_credentials_returns_token() {
    let state = test_state().await;
    let router = crate::routes::app(state.clone(), None);

    let (status, body) =
        send(&router, Method::POST, "/api/login", &[], Some(json!({"username": "admin", "password": "pw"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(state.tokens.verify(token).unwrap().username, "admin");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let router = crate::routes::app(test_state().await, None);

    let (status, body) =
        send(&router, Method::POST, "/api/login", &[], Some(json!({"username": "admin", "password": "nope"}))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"detail": "用户名或密码错误"}));
}

#[tokio::test]
async fn protected_route_without_header_is_forbidden() {
    let router = crate::routes::app(test_state().await, None);

    let (status, body) = send(&router, Method::GET, "/api/auth/list", &[], None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"detail": "Not authenticated"}));
}

#[tokio::test]
async fn protected_route_with_non_bearer_scheme_is_forbidden() {
    let router = crate::routes::app(test_state().await, None);

    let (status, _) = send(&router, Method::GET, "/api/auth/list", &[("authorization", "Basic YWRtaW46cHc=")], None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn protected_route_with_bad_token_is_unauthorized() {
    let router = crate::routes::app(test_state().await, None);

    let (status, body) =
        send(&router, Method::GET, "/api/auth/list", &[("authorization", "Bearer garbage")], None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"detail": "无效的Token"}));
}

#[tokio::test]
async fn protected_route_with_expired_token_is_unauthorized() {
    let router = crate::routes::app(test_state().await, None);
    let expired = TokenKeys::new(SECRET, chrono::Duration::hours(-2)).issue("admin").unwrap();
    let header_value = format!("Bearer {expired}");

    let (status, body) = send(&router, Method::GET, "/api/auth/list", &[("authorization", header_value.as_str())], None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"detail": "Token已过期"}));
}

#[tokio::test]
async fn protected_route_with_valid_token_succeeds() {
    let state = test_state().await;
    let auth = bearer(&state);
    let router = crate::routes::app(state, None);

    let (status, body) = send(&router, Method::GET, "/api/auth/list", &[("authorization", auth.as_str())], None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": 200, "data": []}));
}

#[test]
fn token_errors_map_to_unauthorized() {
    assert_eq!(token_error_to_api(TokenError::Expired).status, StatusCode::UNAUTHORIZED);
    assert_eq!(token_error_to_api(TokenError::Invalid).status, StatusCode::UNAUTHORIZED);
}
