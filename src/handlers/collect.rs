//! Collector endpoint handlers.
//!
//! Used by weather collection sites to manage airports and push measurements.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::error::WeatherError;
use crate::logging::generate_request_id;
use crate::model::DataPoint;
use crate::state::AppState;

/// Handle GET /collect/ping
pub async fn collect_ping_handler() -> &'static str {
    "ready"
}

/// Handle POST /collect/weather/:iata/:kind with a DataPoint JSON body
pub async fn update_weather_handler(
    State(state): State<Arc<AppState>>,
    Path((iata, kind)): Path<(String, String)>,
    body: String,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let endpoint = "/collect/weather";

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        iata = %iata,
        kind = %kind,
        "Processing weather update"
    );

    let data_point: DataPoint = match serde_json::from_str(&body) {
        Ok(dp) => dp,
        Err(e) => {
            let error = WeatherError::InvalidParameter {
                param: "datapoint".to_string(),
                message: e.to_string(),
            };
            return error_response(error, endpoint, &request_id, Some(&body));
        }
    };

    match state.record_measurement(&iata, &kind, data_point) {
        Ok(()) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                iata = %iata,
                kind = %kind,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Weather update accepted"
            );
            StatusCode::OK.into_response()
        }
        Err(error) => error_response(
            error,
            endpoint,
            &request_id,
            Some(&format!("iata={}, kind={}, body={}", iata, kind, body)),
        ),
    }
}

/// Handle GET /collect/airports
pub async fn list_airports_handler(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let mut codes: Vec<String> = state.list_airport_codes().into_iter().collect();
    codes.sort();
    Json(codes)
}

/// Handle GET /collect/airport/:iata
pub async fn get_airport_handler(
    State(state): State<Arc<AppState>>,
    Path(iata): Path<String>,
) -> Response {
    match state.get_airport(&iata) {
        Ok(airport) => Json(airport.as_ref().clone()).into_response(),
        Err(error) => error_response(
            error,
            "/collect/airport",
            &generate_request_id(),
            Some(&iata),
        ),
    }
}

/// Handle POST /collect/airport/:iata/:lat/:long
pub async fn add_airport_handler(
    State(state): State<Arc<AppState>>,
    Path((iata, lat, long)): Path<(String, String, String)>,
) -> Response {
    let request_id = generate_request_id();
    let endpoint = "/collect/airport";
    let params = format!("iata={}, lat={}, long={}", iata, lat, long);

    let result = parse_degrees(&lat, "lat")
        .and_then(|latitude| Ok((latitude, parse_degrees(&long, "long")?)))
        .and_then(|(latitude, longitude)| state.register_airport(&iata, latitude, longitude));

    match result {
        Ok(()) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                iata = %iata,
                "Airport registered"
            );
            StatusCode::OK.into_response()
        }
        Err(error) => error_response(error, endpoint, &request_id, Some(&params)),
    }
}

/// Handle DELETE /collect/airport/:iata. Always succeeds.
pub async fn delete_airport_handler(
    State(state): State<Arc<AppState>>,
    Path(iata): Path<String>,
) -> StatusCode {
    state.remove_airport(&iata);
    StatusCode::OK
}

fn parse_degrees(value: &str, param: &str) -> crate::Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| WeatherError::InvalidCoordinate {
            message: format!("{} '{}' is not a number", param, value),
        })
}
