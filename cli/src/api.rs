//! REST client for the authgate admin API.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and non-2xx responses are kept apart so the console
//! can show the server's `detail` text where it has one. Callers never see
//! panics; every call returns `Result<_, ApiError>`.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use wire::{
    Ack, AuthRule, AuthRuleUpdate, Envelope, ErrorBody, EventFilter, EventRecord, LoginRequest, LoginResponse,
    NewAuthRule, StatsFilter, StatsRow,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}")]
    Status { status: u16, detail: Option<String> },
}

impl ApiError {
    /// Server-provided `detail` text of a non-OK response.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            Self::Http(_) => None,
        }
    }

    /// Whether the request never produced an HTTP response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Endpoints the admin console consumes.
///
/// `token` is attached as `Authorization: Bearer <token>` when present.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn list_rules(&self, token: Option<&str>) -> Result<Vec<AuthRule>, ApiError>;
    async fn create_rule(&self, token: Option<&str>, rule: &NewAuthRule) -> Result<AuthRule, ApiError>;
    async fn update_rule(&self, token: Option<&str>, rule: &AuthRuleUpdate) -> Result<AuthRule, ApiError>;
    async fn delete_rule(&self, token: Option<&str>, id: i64) -> Result<(), ApiError>;
    async fn list_events(&self, token: Option<&str>, filter: &EventFilter) -> Result<Vec<EventRecord>, ApiError>;
    async fn stats(&self, token: Option<&str>, filter: &StatsFilter) -> Result<Vec<StatsRow>, ApiError>;
}

/// [`AdminApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /healthz`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), ApiError> {
        let response = self.client.get(self.url("/healthz")).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status { status: status.as_u16(), detail: None })
        }
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail_text().map(str::to_owned));
            tracing::debug!(status = status.as_u16(), ?detail, "api request rejected");
            return Err(ApiError::Status { status: status.as_u16(), detail });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AdminApi for HttpApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let request = self.request(Method::POST, "/api/login", None).json(credentials);
        Ok(Self::send::<Envelope<LoginResponse>>(request).await?.data)
    }

    async fn list_rules(&self, token: Option<&str>) -> Result<Vec<AuthRule>, ApiError> {
        let request = self.request(Method::GET, "/api/auth/list", token);
        Ok(Self::send::<Envelope<Vec<AuthRule>>>(request).await?.data)
    }

    async fn create_rule(&self, token: Option<&str>, rule: &NewAuthRule) -> Result<AuthRule, ApiError> {
        let request = self.request(Method::POST, "/api/auth/create", token).json(rule);
        Ok(Self::send::<Envelope<AuthRule>>(request).await?.data)
    }

    async fn update_rule(&self, token: Option<&str>, rule: &AuthRuleUpdate) -> Result<AuthRule, ApiError> {
        let request = self.request(Method::POST, "/api/auth/update", token).json(rule);
        Ok(Self::send::<Envelope<AuthRule>>(request).await?.data)
    }

    async fn delete_rule(&self, token: Option<&str>, id: i64) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &format!("/api/auth/delete/{id}"), token);
        Self::send::<Ack>(request).await?;
        Ok(())
    }

    async fn list_events(&self, token: Option<&str>, filter: &EventFilter) -> Result<Vec<EventRecord>, ApiError> {
        let request = self
            .request(Method::GET, "/api/events", token)
            .query(&filter.clone().normalized());
        Ok(Self::send::<Envelope<Vec<EventRecord>>>(request).await?.data)
    }

    async fn stats(&self, token: Option<&str>, filter: &StatsFilter) -> Result<Vec<StatsRow>, ApiError> {
        let request = self
            .request(Method::GET, "/api/stats", token)
            .query(&filter.clone().normalized());
        Ok(Self::send::<Envelope<Vec<StatsRow>>>(request).await?.data)
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
