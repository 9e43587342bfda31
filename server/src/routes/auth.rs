//! Admin login and bearer-token authentication.

use axum::Json;
use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use wire::{Envelope, LoginRequest, LoginResponse};

use crate::routes::ApiError;
use crate::services::token::{Claims, TokenError};
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Administrator authenticated by `Authorization: Bearer <token>`.
/// Use as a handler parameter to require authentication.
#[derive(Debug)]
pub struct AdminUser {
    pub claims: Claims,
}

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::new(StatusCode::FORBIDDEN, "Not authenticated"))?;

        let app_state = AppState::from_ref(state);
        let claims = app_state.tokens.verify(bearer.token()).map_err(token_error_to_api)?;
        Ok(Self { claims })
    }
}

pub(crate) fn token_error_to_api(err: TokenError) -> ApiError {
    match err {
        TokenError::Expired | TokenError::Invalid => ApiError::new(StatusCode::UNAUTHORIZED, err.to_string()),
        TokenError::TtlOverflow | TokenError::Encode(_) => ApiError::internal(&err),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/login`: exchange admin credentials for a token.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Envelope<LoginResponse>>, ApiError> {
    if !state.admin.matches(&body.username, &body.password) {
        tracing::warn!(username = %body.username, "admin login rejected");
        return Err(ApiError::new(StatusCode::UNAUTHORIZED, "用户名或密码错误"));
    }

    let token = state.tokens.issue(&body.username).map_err(token_error_to_api)?;
    tracing::info!(username = %body.username, "admin logged in");
    Ok(Json(Envelope::ok(LoginResponse { token })))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
