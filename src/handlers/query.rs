//! Query endpoint handlers.
//!
//! Serve weather around an airport and the service health report.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::error::WeatherError;
use crate::health::HealthReport;
use crate::logging::generate_request_id;
use crate::model::AtmosphericSnapshot;
use crate::state::AppState;

/// Handle GET /query/ping: the health report
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    let report = state.health_report();
    debug!(
        endpoint = "/query/ping",
        datasize = report.datasize,
        airports = report.iata_freq.len(),
        "Health report generated"
    );
    Json(report)
}

/// Handle GET /query/weather/:iata/:radius
pub async fn weather_handler(
    State(state): State<Arc<AppState>>,
    Path((iata, radius)): Path<(String, String)>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let endpoint = "/query/weather";
    let params = format!("iata={}, radius={}", iata, radius);

    let radius_km = match parse_radius(&radius) {
        Ok(r) => r,
        Err(error) => return error_response(error, endpoint, &request_id, Some(&params)),
    };

    match state.query_weather(&iata, radius_km) {
        Ok(snapshots) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                iata = %iata,
                radius_km = radius_km,
                results = snapshots.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Weather query successful"
            );
            let body: Vec<AtmosphericSnapshot> =
                snapshots.iter().map(|s| s.as_ref().clone()).collect();
            Json(body).into_response()
        }
        Err(error) => error_response(error, endpoint, &request_id, Some(&params)),
    }
}

/// Parse a radius path segment. A blank radius means 0.
fn parse_radius(value: &str) -> crate::Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| WeatherError::InvalidParameter {
            param: "radius".to_string(),
            message: format!("'{}' is not a number", value),
        })
}
