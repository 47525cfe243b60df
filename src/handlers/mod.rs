//! HTTP request handlers for the aerowx API.
//!
//! Two endpoint families mirror the two kinds of clients: weather collection
//! sites under `/collect` and weather consumers under `/query`.

pub mod collect;
pub mod heartbeat;
pub mod query;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::WeatherError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

pub use collect::{
    add_airport_handler, collect_ping_handler, delete_airport_handler, get_airport_handler,
    list_airports_handler, update_weather_handler,
};
pub use heartbeat::heartbeat_handler;
pub use query::{health_handler, weather_handler};

/// Build the application router over a shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/collect/ping", get(collect_ping_handler))
        .route("/collect/weather/:iata/:kind", post(update_weather_handler))
        .route("/collect/airports", get(list_airports_handler))
        .route(
            "/collect/airport/:iata",
            get(get_airport_handler).delete(delete_airport_handler),
        )
        .route("/collect/airport/:iata/:lat/:long", post(add_airport_handler))
        .route("/query/ping", get(health_handler))
        .route("/query/weather/:iata/:radius", get(weather_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Log a failed request and turn the error into a JSON response
pub(crate) fn error_response(
    error: WeatherError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);
    (
        error.status_code(),
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}
