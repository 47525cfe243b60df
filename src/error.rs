//! Error types for the aerowx application.
//!
//! Every failure the core can report is a variant of [`WeatherError`]. None of
//! them is fatal to the process: a failed call leaves all state unchanged.

use axum::http::StatusCode;
use thiserror::Error;

use crate::model::MeasurementKind;

/// The main error type for aerowx operations.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Latitude or longitude outside its valid range
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinate { message: String },

    /// Missing or malformed airport code
    #[error("Invalid airport code: '{code}'")]
    InvalidCode { code: String },

    /// Referenced airport is not registered
    #[error("Unknown airport: {code}")]
    UnknownAirport { code: String },

    /// Lookup miss that is not tied to a referenced airport
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Measurement kind not recognized
    #[error("Invalid measurement kind: '{kind}'")]
    InvalidKind { kind: String },

    /// Measurement mean outside the bounds of its kind
    #[error("Value {value} out of range for {kind} [{min}, {max})")]
    OutOfRange {
        kind: MeasurementKind,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Invalid request parameter
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Airport file parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl WeatherError {
    /// HTTP status the transport layer reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WeatherError::UnknownAirport { .. } | WeatherError::NotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            WeatherError::InvalidCoordinate { .. }
            | WeatherError::InvalidCode { .. }
            | WeatherError::InvalidKind { .. }
            | WeatherError::OutOfRange { .. }
            | WeatherError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            WeatherError::Io(_)
            | WeatherError::Csv(_)
            | WeatherError::Json(_)
            | WeatherError::Config { .. }
            | WeatherError::Server { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller is at fault (4xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Convenience type alias for Results with WeatherError
pub type Result<T> = std::result::Result<T, WeatherError>;
