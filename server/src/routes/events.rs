//! Event log and statistics routes.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use wire::{Envelope, EventFilter, EventRecord, StatsFilter, StatsRow};

use crate::routes::ApiError;
use crate::routes::auth::AdminUser;
use crate::services::events::{self, DateRange, EventError};
use crate::state::AppState;

fn event_error_to_api(err: EventError) -> ApiError {
    ApiError::internal(&err)
}

/// `GET /api/events?app&event_type`: filtered events, newest first.
pub async fn list_events(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Envelope<Vec<EventRecord>>>, ApiError> {
    let events = events::list_events(&state.pool, &filter).await.map_err(event_error_to_api)?;
    Ok(Json(Envelope::ok(events)))
}

/// `GET /api/stats?start_date&end_date`: per-app usage counts.
pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(filter): Query<StatsFilter>,
) -> Result<Json<Envelope<Vec<StatsRow>>>, ApiError> {
    let range = DateRange::from_filter(&filter).map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
    let rows = events::stats(&state.pool, range).await.map_err(event_error_to_api)?;
    Ok(Json(Envelope::ok(rows)))
}
