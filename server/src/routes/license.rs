//! License check routes called by client applications (unauthenticated).

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::Json;
use axum::extract::{ConnectInfo, FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use serde_json::{Value, json};
use wire::{Envelope, ErrorBody, LicenseGrant, LicenseQuery};

use crate::routes::ApiError;
use crate::routes::rules::rule_error_to_api;
use crate::services::license::{self, LicenseError};
use crate::state::AppState;

/// Proxy headers consulted in priority order before the socket peer.
const CLIENT_IP_HEADERS: [&str; 4] = ["cf-connecting-ip", "true-client-ip", "x-real-ip", "x-client-ip"];

/// The caller's IP as seen through any fronting proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts.extensions.get::<ConnectInfo<SocketAddr>>().map(|info| info.0.ip());
        Ok(Self(resolve_client_ip(&parts.headers, peer)))
    }
}

pub(crate) fn resolve_client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(ip) = CLIENT_IP_HEADERS.iter().find_map(|name| header(name)) {
        return ip.to_owned();
    }
    if let Some(first) = header("x-forwarded-for").and_then(|chain| chain.split(',').next()) {
        let first = first.trim();
        if !first.is_empty() {
            return first.to_owned();
        }
    }
    peer.map_or_else(|| "unknown".to_owned(), |ip| ip.to_string())
}

fn license_error_to_api(err: LicenseError) -> ApiError {
    match err {
        LicenseError::Unauthorized => ApiError {
            status: StatusCode::FORBIDDEN,
            body: ErrorBody { detail: json!({ "code": 403, "message": "未授权访问" }) },
        },
        LicenseError::Rules(err) => rule_error_to_api(err),
        LicenseError::Events(inner) => ApiError::internal(&inner),
    }
}

/// `GET /api/event/start?app&version`: authorize and log an application start.
pub async fn start(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    Query(query): Query<LicenseQuery>,
) -> Result<Json<Envelope<LicenseGrant>>, ApiError> {
    let grant = license::authorize_start(&state.pool, &query.app, &query.version, &client_ip)
        .await
        .map_err(license_error_to_api)?;
    Ok(Json(Envelope::ok(grant)))
}

/// `GET /api/event/stop?app&version`: log an application stop.
pub async fn stop(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    Query(query): Query<LicenseQuery>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    license::record_stop(&state.pool, &query.app, &query.version, &client_ip)
        .await
        .map_err(license_error_to_api)?;
    Ok(Json(Envelope::ok(json!({}))))
}

#[cfg(test)]
#[path = "license_test.rs"]
mod tests;
