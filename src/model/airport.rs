//! Airport records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::coordinate::Coordinate;
use crate::error::{Result, WeatherError};

/// Length of an IATA code accepted by the public registration path
pub const IATA_CODE_LEN: usize = 3;

/// Check an airport code as supplied by a caller of the public add path.
///
/// The code must be exactly three characters; it is not case-folded.
pub fn validate_iata(code: &str) -> Result<()> {
    if code.chars().count() != IATA_CODE_LEN || code.trim() != code {
        return Err(WeatherError::InvalidCode {
            code: code.to_string(),
        });
    }
    Ok(())
}

/// Daylight-saving region an airport follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DaylightSavings {
    /// Europe
    E,
    /// US/Canada
    A,
    /// South America
    S,
    /// Australia
    O,
    /// New Zealand
    Z,
    /// None
    N,
    /// Unknown
    #[default]
    U,
}

impl DaylightSavings {
    /// All regions, in declaration order
    pub const ALL: [DaylightSavings; 7] = [
        DaylightSavings::E,
        DaylightSavings::A,
        DaylightSavings::S,
        DaylightSavings::O,
        DaylightSavings::Z,
        DaylightSavings::N,
        DaylightSavings::U,
    ];

    /// Human readable region name
    pub fn region(&self) -> &'static str {
        match self {
            DaylightSavings::E => "Europe",
            DaylightSavings::A => "US/Canada",
            DaylightSavings::S => "South America",
            DaylightSavings::O => "Australia",
            DaylightSavings::Z => "New Zealand",
            DaylightSavings::N => "None",
            DaylightSavings::U => "Unknown",
        }
    }

    /// One-letter code as found in airport data files
    pub fn code(&self) -> &'static str {
        match self {
            DaylightSavings::E => "E",
            DaylightSavings::A => "A",
            DaylightSavings::S => "S",
            DaylightSavings::O => "O",
            DaylightSavings::Z => "Z",
            DaylightSavings::N => "N",
            DaylightSavings::U => "U",
        }
    }
}

impl FromStr for DaylightSavings {
    type Err = WeatherError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        DaylightSavings::ALL
            .into_iter()
            .find(|dst| dst.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| WeatherError::InvalidParameter {
                param: "dst".to_string(),
                message: format!("Unknown daylight savings region: '{}'", s),
            })
    }
}

impl fmt::Display for DaylightSavings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.region())
    }
}

/// Basic airport information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// The three letter IATA code, primary key of the registry
    pub iata: String,
    /// The four letter ICAO code
    #[serde(default)]
    pub icao: String,
    /// Main city served by the airport
    #[serde(default)]
    pub city: String,
    /// Country or territory where the airport is located
    #[serde(default)]
    pub country: String,
    /// Latitude/longitude in degrees
    pub coordinate: Coordinate,
    /// Altitude in feet
    #[serde(default)]
    pub altitude: f64,
    /// Hours offset from UTC, fractional hours as decimals
    #[serde(default)]
    pub timezone: f64,
    /// Daylight-saving region
    #[serde(default)]
    pub dst: DaylightSavings,
}

impl Airport {
    /// Create an airport with only its identity and location set.
    pub fn new(iata: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            iata: iata.into(),
            icao: String::new(),
            city: String::new(),
            country: String::new(),
            coordinate,
            altitude: 0.0,
            timezone: 0.0,
            dst: DaylightSavings::default(),
        }
    }

    pub fn with_icao(mut self, icao: impl Into<String>) -> Self {
        self.icao = icao.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn with_timezone(mut self, timezone: f64) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_dst(mut self, dst: DaylightSavings) -> Self {
        self.dst = dst;
        self
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.6}, {:.6})",
            self.iata,
            self.coordinate.latitude(),
            self.coordinate.longitude()
        )?;
        if !self.city.is_empty() {
            write!(f, " {}, {}", self.city, self.country)?;
        }
        Ok(())
    }
}
