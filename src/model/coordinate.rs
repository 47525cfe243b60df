//! Geographic coordinates and their validation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};

/// Valid latitude range in degrees (inclusive)
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range in degrees (inclusive)
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Check that a latitude is a finite value within [-90, 90].
pub fn is_valid_latitude(latitude: f64) -> bool {
    (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude)
}

/// Check that a longitude is a finite value within [-180, 180].
pub fn is_valid_longitude(longitude: f64) -> bool {
    (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude)
}

/// A validated latitude/longitude pair in degrees.
///
/// The fields are private so a `Coordinate` can only be obtained through
/// [`Coordinate::new`]; out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, failing with `InvalidCoordinate` if either
    /// component is out of range (NaN included).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !is_valid_latitude(latitude) {
            return Err(WeatherError::InvalidCoordinate {
                message: format!(
                    "latitude {} is outside the range {} to {}",
                    latitude, LATITUDE_RANGE.0, LATITUDE_RANGE.1
                ),
            });
        }
        if !is_valid_longitude(longitude) {
            return Err(WeatherError::InvalidCoordinate {
                message: format!(
                    "longitude {} is outside the range {} to {}",
                    longitude, LONGITUDE_RANGE.0, LONGITUDE_RANGE.1
                ),
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

// Deserialization goes through `new` so a payload cannot bypass validation.
impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            latitude: f64,
            longitude: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Coordinate::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}
