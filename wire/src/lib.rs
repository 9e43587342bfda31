//! Shared JSON wire model for the authgate HTTP API.
//!
//! This crate owns the request and response shapes used by both `server` and
//! `cli`. Successful responses are wrapped in an [`Envelope`]; failures carry
//! an [`ErrorBody`] whose `detail` is usually a plain string.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// ENVELOPE
// =============================================================================

/// Success wrapper: `{"code": 200, "data": ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub data: T,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self { code: 200, data }
    }
}

/// Envelope with no payload, as returned by delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub code: u16,
}

impl Ack {
    #[must_use]
    pub fn ok() -> Self {
        Self { code: 200 }
    }
}

/// Error body: `{"detail": ...}`.
///
/// `detail` is a string for ordinary failures. The license check refusal
/// nests an object `{code, message}` instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: Value,
}

impl ErrorBody {
    #[must_use]
    pub fn message(detail: impl Into<String>) -> Self {
        Self { detail: Value::String(detail.into()) }
    }

    /// The detail as text, if it is a plain string.
    #[must_use]
    pub fn detail_text(&self) -> Option<&str> {
        self.detail.as_str()
    }
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// =============================================================================
// AUTHORIZATION RULES
// =============================================================================

/// A stored authorization rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRule {
    pub id: i64,
    pub app: String,
    /// `1.0.0`, `>=1.0`, `<=2.0` or `1.0-2.0`.
    pub version_rule: String,
    /// Comma-separated IPs, ranges, wildcards or CIDR blocks.
    pub ip_rule: String,
    /// Opaque payload handed to the licensed application on success.
    pub detail_info: String,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /api/auth/create`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthRule {
    pub app: String,
    pub version_rule: String,
    pub ip_rule: String,
    pub detail_info: String,
}

/// Body of `POST /api/auth/update`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRuleUpdate {
    pub id: i64,
    pub app: String,
    pub version_rule: String,
    pub ip_rule: String,
    pub detail_info: String,
}

/// Editable rule form. A missing `id` means the form creates a new rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRuleForm {
    pub id: Option<i64>,
    pub app: String,
    pub version_rule: String,
    pub ip_rule: String,
    pub detail_info: String,
}

impl AuthRuleForm {
    /// Split the form into the create or update request it represents.
    #[must_use]
    pub fn into_request(self) -> RuleRequest {
        match self.id {
            Some(id) => RuleRequest::Update(AuthRuleUpdate {
                id,
                app: self.app,
                version_rule: self.version_rule,
                ip_rule: self.ip_rule,
                detail_info: self.detail_info,
            }),
            None => RuleRequest::Create(NewAuthRule {
                app: self.app,
                version_rule: self.version_rule,
                ip_rule: self.ip_rule,
                detail_info: self.detail_info,
            }),
        }
    }
}

impl From<&AuthRule> for AuthRuleForm {
    fn from(rule: &AuthRule) -> Self {
        Self {
            id: Some(rule.id),
            app: rule.app.clone(),
            version_rule: rule.version_rule.clone(),
            ip_rule: rule.ip_rule.clone(),
            detail_info: rule.detail_info.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleRequest {
    Create(NewAuthRule),
    Update(AuthRuleUpdate),
}

// =============================================================================
// EVENTS
// =============================================================================

/// Error returned when parsing an unknown event type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown event type: {0}")]
pub struct UnknownEventKind(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Stop,
}

impl EventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(UnknownEventKind(other.to_owned())),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded start/stop event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub app: String,
    pub version: String,
    pub event_type: EventKind,
    pub client_ip: String,
    pub created_at: NaiveDateTime,
}

/// Query string of `GET /api/events`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

impl EventFilter {
    /// Drop blank fields so they are neither sent nor applied.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self { app: non_blank(self.app), event_type: non_blank(self.event_type) }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Query string of `GET /api/stats`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl StatsFilter {
    #[must_use]
    pub fn normalized(self) -> Self {
        Self { start_date: non_blank(self.start_date), end_date: non_blank(self.end_date) }
    }
}

/// Per-app usage counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRow {
    pub app: String,
    pub start_count: i64,
    pub stop_count: i64,
    pub unique_ips: i64,
}

// =============================================================================
// LICENSE CHECK
// =============================================================================

/// Query string of `GET /api/event/start` and `GET /api/event/stop`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseQuery {
    pub app: String,
    pub version: String,
}

/// Payload returned to a licensed application whose start was authorized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseGrant {
    pub detail_info: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
