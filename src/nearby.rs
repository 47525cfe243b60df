//! Nearby airport weather queries.
//!
//! Distances are great-circle distances from the haversine formula on a
//! sphere of radius [`EARTH_RADIUS_KM`].

use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Result, WeatherError};
use crate::model::{AtmosphericSnapshot, Coordinate};
use crate::registry::AirportRegistry;
use crate::repository::AtmosphericRepository;
use crate::tracker::FrequencyTracker;

/// Earth radius in km
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// Great-circle distance in km between two coordinates given in degrees.
pub fn haversine_km(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let d_lat = (to.latitude() - from.latitude()).to_radians();
    let d_lon = (to.longitude() - from.longitude()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// One airport returned by a nearby query.
#[derive(Debug, Clone)]
pub struct NearbyMatch {
    pub iata: String,
    /// Distance from the origin, 0 for the origin itself
    pub distance_km: f64,
    pub snapshot: Arc<AtmosphericSnapshot>,
}

/// Answers "weather around airport X" queries.
#[derive(Debug)]
pub struct NearbyQueryEngine {
    registry: Arc<AirportRegistry>,
    repository: Arc<AtmosphericRepository>,
    tracker: Arc<FrequencyTracker>,
}

impl NearbyQueryEngine {
    pub fn new(
        registry: Arc<AirportRegistry>,
        repository: Arc<AtmosphericRepository>,
        tracker: Arc<FrequencyTracker>,
    ) -> Self {
        Self {
            registry,
            repository,
            tracker,
        }
    }

    /// Find the weather at and around `origin`.
    ///
    /// Every call is counted once by the frequency tracker with the raw
    /// `radius_km`. Negative and NaN radii are treated as 0. A radius of 0
    /// returns exactly the origin's snapshot, empty or not, without a
    /// registry lookup. A positive radius requires a registered origin and
    /// returns every airport within `radius_km` (inclusive) whose snapshot
    /// holds data, ordered by distance then code.
    pub fn find(&self, origin: &str, radius_km: f64) -> Result<Vec<NearbyMatch>> {
        self.tracker.record_query(origin, radius_km);

        let radius = if radius_km.is_nan() {
            0.0
        } else {
            radius_km.max(0.0)
        };

        if radius == 0.0 {
            return Ok(vec![NearbyMatch {
                iata: origin.to_string(),
                distance_km: 0.0,
                snapshot: self.repository.get(origin),
            }]);
        }

        let origin_airport =
            self.registry
                .get(origin)
                .ok_or_else(|| WeatherError::UnknownAirport {
                    code: origin.to_string(),
                })?;

        let mut matches: Vec<NearbyMatch> = self
            .registry
            .list()
            .into_iter()
            .filter_map(|airport| {
                let distance_km = haversine_km(&origin_airport.coordinate, &airport.coordinate);
                if distance_km > radius {
                    return None;
                }
                let snapshot = self.repository.get(&airport.iata);
                snapshot.has_data().then(|| NearbyMatch {
                    iata: airport.iata.clone(),
                    distance_km,
                    snapshot,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.iata.cmp(&b.iata))
        });

        debug!(
            iata = %origin,
            radius_km = radius,
            matches = matches.len(),
            "Nearby query evaluated"
        );
        Ok(matches)
    }
}
