//! Structured logging for aerowx.
//!
//! Subscriber setup, the HTTP trace layer, and the handful of events every
//! deployment wants to grep for: startup settings, airport file loads and
//! request failures.

use std::time::Duration;
use tracing::{debug, error, info, Level};

use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::config::Config;
use crate::error::WeatherError;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::DEBUG)
                .latency_unit(LatencyUnit::Micros),
        )
}

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_tracing(log_level: &str) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log the effective settings once at startup
pub fn log_startup(config: &Config) {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        workers = ?config.server.workers,
        airports_file = ?config.data.airports_file,
        freshness_window_ms = config.data.freshness_window_ms,
        "Starting aerowx"
    );
}

/// Log the outcome of an airport bulk load
pub fn log_airport_load_stats(
    file_path: &str,
    loaded: usize,
    skipped: usize,
    registered_total: usize,
    elapsed: Duration,
) {
    info!(
        operation = "airport_load",
        file_path = file_path,
        loaded = loaded,
        skipped = skipped,
        registered_total = registered_total,
        duration_ms = elapsed.as_secs_f64() * 1000.0,
        "Airports loaded"
    );
}

/// Log an error with context
pub fn log_error(error: &WeatherError, context: &str) {
    error!(error = %error, context = context, "Error occurred");
}

/// Log a failed request.
///
/// Caller mistakes (unknown airport, bad kind, out-of-range value) are routine
/// and go to debug; anything mapped to a 5xx goes to error.
pub fn log_request_error(
    error: &WeatherError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    let status = error.status_code().as_u16();
    let params = params.unwrap_or("none");
    if error.is_client_error() {
        debug!(
            error = %error,
            endpoint,
            request_id,
            params,
            status,
            "Request rejected"
        );
    } else {
        error!(
            error = %error,
            endpoint,
            request_id,
            params,
            status,
            "Request processing error"
        );
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_id() {
        let id1 = generate_request_id();
        let id2 = generate_request_id();

        assert!(!id1.is_empty());
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_log_request_error_both_levels() {
        log_request_error(
            &WeatherError::UnknownAirport {
                code: "XXX".to_string(),
            },
            "/collect/weather",
            "req-1",
            None,
        );
        log_request_error(
            &WeatherError::Server {
                message: "bind failed".to_string(),
            },
            "/query/ping",
            "req-2",
            Some("iata=BOS"),
        );
    }
}
