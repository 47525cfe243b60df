//! Airport data file loading.
//!
//! Reads comma-separated airport files with one header line and the columns
//!
//! ```text
//! id, city, country, iata, icao, latitude, longitude, altitude, timezone, dst
//! ```
//!
//! Fields may be quoted. Rows that cannot be turned into a valid airport are
//! skipped with a warning rather than aborting the whole load.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::{Result, WeatherError};
use crate::logging::log_airport_load_stats;
use crate::model::{validate_iata, Airport, Coordinate, DaylightSavings};
use crate::state::AppState;

/// Number of columns an airport row must carry
pub const AIRPORT_COLUMNS: usize = 10;

/// Outcome of parsing or loading an airport file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows registered (or parsed)
    pub loaded: usize,
    /// Rows rejected
    pub skipped: usize,
}

/// Parsed content of an airport file
#[derive(Debug, Default)]
pub struct ParsedAirports {
    pub airports: Vec<Airport>,
    pub skipped: usize,
}

/// Load an airport file into the registry of `state`.
pub fn load_airports(path: &Path, state: &AppState) -> Result<LoadSummary> {
    if !path.exists() {
        return Err(WeatherError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    info!("Loading airports from {}", path.display());

    let start = Instant::now();
    let parsed = read_airports_file(path)?;
    let mut summary = LoadSummary {
        loaded: 0,
        skipped: parsed.skipped,
    };

    for airport in parsed.airports {
        let code = airport.iata.clone();
        match state.add_airport(airport) {
            Ok(()) => summary.loaded += 1,
            Err(e) => {
                warn!(iata = %code, error = %e, "Airport rejected by registry");
                summary.skipped += 1;
            }
        }
    }

    log_airport_load_stats(
        &path.display().to_string(),
        summary.loaded,
        summary.skipped,
        state.airport_count(),
        start.elapsed(),
    );
    Ok(summary)
}

/// Parse an airport file without registering anything.
pub fn read_airports_file(path: &Path) -> Result<ParsedAirports> {
    let file = std::fs::File::open(path)?;
    read_airports(file)
}

/// Parse airport rows from any reader. The first line is a header.
pub fn read_airports<R: Read>(reader: R) -> Result<ParsedAirports> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut parsed = ParsedAirports::default();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // +2: one for the header, one for 1-based line numbers
        let line = index + 2;

        match parse_airport_record(&record) {
            Ok(airport) => parsed.airports.push(airport),
            Err(e) => {
                warn!(line, error = %e, "Skipping malformed airport row");
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

/// Turn one CSV record into an airport.
pub fn parse_airport_record(record: &StringRecord) -> Result<Airport> {
    if record.len() < AIRPORT_COLUMNS {
        return Err(WeatherError::InvalidParameter {
            param: "row".to_string(),
            message: format!(
                "expected {} columns, found {}",
                AIRPORT_COLUMNS,
                record.len()
            ),
        });
    }

    let field = |i: usize| record.get(i).unwrap_or_default();

    let iata = field(3);
    validate_iata(iata)?;

    let latitude = parse_number(field(5), "latitude")?;
    let longitude = parse_number(field(6), "longitude")?;
    let coordinate = Coordinate::new(latitude, longitude)?;

    Ok(Airport::new(iata, coordinate)
        .with_city(field(1))
        .with_country(field(2))
        .with_icao(field(4))
        .with_altitude(parse_number(field(7), "altitude")?)
        .with_timezone(parse_number(field(8), "timezone")?)
        .with_dst(field(9).parse::<DaylightSavings>()?))
}

fn parse_number(value: &str, param: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| WeatherError::InvalidParameter {
            param: param.to_string(),
            message: format!("'{}' is not a number", value),
        })
}
