//! Test data generation utilities.
//!
//! Airport fixtures around New York and Boston plus data point helpers.

use std::io::Write;
use std::path::Path;

use aerowx::{AppState, Config, DataPoint};

/// (code, latitude, longitude) of the standard fixture airports
pub const AIRPORTS: [(&str, f64, f64); 5] = [
    ("BOS", 42.364347, -71.005181),
    ("EWR", 40.6925, -74.168667),
    ("JFK", 40.639751, -73.778925),
    ("LGA", 40.777245, -73.872608),
    ("MMU", 40.79935, -74.4148747),
];

/// A data point with the given mean and fixed quartiles
pub fn data_point(mean: f64) -> DataPoint {
    DataPoint::new(mean, 10.0, 20.0, 30.0, 10)
}

/// JSON body for a data point, in the collector wire format
pub fn data_point_json(mean: f64) -> String {
    serde_json::to_string(&data_point(mean)).expect("Failed to serialize data point")
}

/// A state with the fixture airports registered
pub fn seeded_state() -> AppState {
    let state = AppState::new(Config::default());
    for (code, lat, lon) in AIRPORTS {
        state
            .register_airport(code, lat, lon)
            .expect("Failed to register fixture airport");
    }
    state
}

/// Writes an airport CSV file holding the fixture airports plus one bad row.
pub fn create_airports_csv(path: &Path) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(
        file,
        "id,city,country,iata,icao,latitude,longitude,altitude,timezone,dst"
    )?;
    let details = [
        ("Boston", "KBOS"),
        ("Newark", "KEWR"),
        ("New York", "KJFK"),
        ("New York", "KLGA"),
        ("Morristown", "KMMU"),
    ];
    for (i, ((code, lat, lon), (city, icao))) in AIRPORTS.iter().zip(details).enumerate() {
        writeln!(
            file,
            "\"{}\",\"{}\",\"United States\",\"{}\",\"{}\",{},{},20,-5,\"A\"",
            i + 1,
            city,
            code,
            icao,
            lat,
            lon
        )?;
    }
    writeln!(file, "\"99\",\"Nowhere\",\"Atlantis\",\"NOWHERE\",\"\",0,0,0,0,\"U\"")?;
    Ok(())
}
