//! Offline inspection of an airport data file.
//!
//! ```text
//! inspect_airports <file> [origin] [radius_km]
//! ```
//!
//! Prints a summary of the file and, given an origin code, the airports
//! within the radius (default 200 km) ordered by distance.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

use aerowx::airport_loader::read_airports_file;
use aerowx::nearby::haversine_km;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(file_path) = args.next().map(PathBuf::from) else {
        bail!("usage: inspect_airports <file> [origin] [radius_km]");
    };
    let origin = args.next();
    let radius_km = match args.next() {
        Some(r) => r
            .parse::<f64>()
            .with_context(|| format!("radius '{}' is not a number", r))?,
        None => 200.0,
    };

    println!("Inspecting airport file: {}", file_path.display());

    let parsed = read_airports_file(&file_path)
        .with_context(|| format!("failed to read {}", file_path.display()))?;

    println!("\n=== FILE INFORMATION ===");
    println!("Airports: {}", parsed.airports.len());
    println!("Skipped rows: {}", parsed.skipped);

    let mut by_country: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_dst: BTreeMap<&str, usize> = BTreeMap::new();
    for airport in &parsed.airports {
        *by_country.entry(airport.country.as_str()).or_default() += 1;
        *by_dst.entry(airport.dst.region()).or_default() += 1;
    }

    println!("\nBy country:");
    for (country, count) in &by_country {
        println!("  {:<30} {}", country, count);
    }

    println!("\nBy daylight savings region:");
    for (region, count) in &by_dst {
        println!("  {:<30} {}", region, count);
    }

    if let Some(origin) = origin {
        let from = parsed
            .airports
            .iter()
            .find(|a| a.iata == origin)
            .with_context(|| format!("origin {} not found in file", origin))?;

        let mut nearby: Vec<(f64, &str)> = parsed
            .airports
            .iter()
            .map(|a| (haversine_km(&from.coordinate, &a.coordinate), a.iata.as_str()))
            .filter(|(distance, _)| *distance <= radius_km)
            .collect();
        nearby.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        println!("\nWithin {} km of {}:", radius_km, origin);
        for (distance, iata) in nearby {
            println!("  {}  {:>9.1} km", iata, distance);
        }
    }

    Ok(())
}
