//! Heartbeat endpoint handler.
//!
//! Returns process liveness information: instance id, uptime and store sizes.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::state::AppState;

/// Server ID generated once per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> = once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Registered airports
    pub airport_count: usize,
    /// Airports holding an atmospheric snapshot
    pub snapshot_count: usize,
    /// Server status
    pub status: String,
}

/// Force the start time to be captured. Called once at startup.
pub fn mark_start() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    Json(build_heartbeat(&state))
}

fn build_heartbeat(state: &AppState) -> HeartbeatResponse {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        airport_count: state.airport_count(),
        snapshot_count: state.snapshot_count(),
        status: "healthy".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::DataPoint;

    #[test]
    fn test_heartbeat_response_structure() {
        mark_start();
        let state = AppState::new(Config::default());
        state.register_airport("BOS", 42.364347, -71.005181).unwrap();
        state.register_airport("JFK", 40.639751, -73.778925).unwrap();
        state
            .record_measurement("JFK", "humidity", DataPoint::new(40.0, 0.0, 0.0, 0.0, 3))
            .unwrap();

        let first = build_heartbeat(&state);
        let second = build_heartbeat(&state);

        assert_eq!(first.airport_count, 2);
        assert_eq!(first.snapshot_count, 1);
        assert_eq!(first.status, "healthy");
        assert_eq!(first.server_id, second.server_id);
        assert!(first.timestamp.ends_with('Z'));
    }
}
