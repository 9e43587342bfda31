//! Event log and usage statistics.
//!
//! DESIGN
//! ======
//! Events are append-only rows written by the license endpoints. Listing and
//! statistics are plain SQL with optional filters appended through
//! `QueryBuilder`, so absent filters add no predicate at all.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use wire::{EventFilter, EventKind, EventRecord, StatsFilter, StatsRow};

use crate::db;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored event has unknown type: {0}")]
    Corrupt(#[from] wire::UnknownEventKind),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid date: {0:?}")]
pub struct DateBoundError(pub String);

// =============================================================================
// DATE RANGE
// =============================================================================

/// Inclusive `created_at` bounds for statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// Parse the optional bounds of a stats query.
    ///
    /// # Errors
    ///
    /// Returns the first bound that is neither a date nor a date-time.
    pub fn from_filter(filter: &StatsFilter) -> Result<Self, DateBoundError> {
        let filter = filter.clone().normalized();
        Ok(Self {
            start: filter.start_date.as_deref().map(|raw| parse_bound(raw, NaiveTime::MIN)).transpose()?,
            end: filter.end_date.as_deref().map(|raw| parse_bound(raw, end_of_day())).transpose()?,
        })
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// Accepts RFC 3339 (converted to UTC), `YYYY-MM-DD[T ]HH:MM:SS[.fff]`, or a
/// bare date, which takes `date_time` as its time of day.
fn parse_bound(raw: &str, date_time: NaiveTime) -> Result<NaiveDateTime, DateBoundError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(date_time))
        .map_err(|_| DateBoundError(raw.to_owned()))
}

// =============================================================================
// EVENTS
// =============================================================================

fn event_from_row(row: &SqliteRow) -> Result<EventRecord, EventError> {
    let kind: String = row.try_get("event_type")?;
    Ok(EventRecord {
        id: row.try_get("id")?,
        app: row.try_get("app")?,
        version: row.try_get("version")?,
        event_type: kind.parse()?,
        client_ip: row.try_get("client_ip")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Append one event.
pub async fn record_event(
    pool: &SqlitePool,
    app: &str,
    version: &str,
    kind: EventKind,
    client_ip: &str,
) -> Result<EventRecord, EventError> {
    let row = sqlx::query(
        "INSERT INTO events (app, version, event_type, client_ip, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id, app, version, event_type, client_ip, created_at",
    )
    .bind(app)
    .bind(version)
    .bind(kind.as_str())
    .bind(client_ip)
    .bind(db::now())
    .fetch_one(pool)
    .await?;

    let event = event_from_row(&row)?;
    tracing::debug!(id = event.id, app, version, kind = %kind, client_ip, "event recorded");
    Ok(event)
}

/// Events matching every present filter field, newest first.
pub async fn list_events(pool: &SqlitePool, filter: &EventFilter) -> Result<Vec<EventRecord>, EventError> {
    let filter = filter.clone().normalized();
    let mut query: QueryBuilder<'_, Sqlite> =
        QueryBuilder::new("SELECT id, app, version, event_type, client_ip, created_at FROM events WHERE 1 = 1");
    if let Some(app) = filter.app {
        query.push(" AND app = ").push_bind(app);
    }
    if let Some(event_type) = filter.event_type {
        query.push(" AND event_type = ").push_bind(event_type);
    }
    query.push(" ORDER BY created_at DESC, id DESC");

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(event_from_row).collect()
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Per-app start count, stop count and distinct client IPs within `range`.
pub async fn stats(pool: &SqlitePool, range: DateRange) -> Result<Vec<StatsRow>, EventError> {
    let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
        "SELECT app,
                SUM(CASE WHEN event_type = 'start' THEN 1 ELSE 0 END) AS start_count,
                SUM(CASE WHEN event_type = 'stop' THEN 1 ELSE 0 END) AS stop_count,
                COUNT(DISTINCT client_ip) AS unique_ips
         FROM events WHERE 1 = 1",
    );
    if let Some(start) = range.start {
        query.push(" AND created_at >= ").push_bind(start);
    }
    if let Some(end) = range.end {
        query.push(" AND created_at <= ").push_bind(end);
    }
    query.push(" GROUP BY app ORDER BY app");

    let rows = query.build().fetch_all(pool).await?;
    rows.iter()
        .map(|row| -> Result<StatsRow, EventError> {
            Ok(StatsRow {
                app: row.try_get("app")?,
                start_count: row.try_get("start_count")?,
                stop_count: row.try_get("stop_count")?,
                unique_ips: row.try_get("unique_ips")?,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
