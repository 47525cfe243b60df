//! Application state management for aerowx.
//!
//! [`AppState`] is the composition root: it builds the registry, repository,
//! tracker, query engine and health reporter once, wires them together, and
//! exposes the operations the transport layer calls. It is shared across
//! handlers behind an `Arc`; there is no global instance.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Result, WeatherError};
use crate::health::{HealthReport, HealthReporter};
use crate::model::{validate_iata, Airport, AtmosphericSnapshot, Coordinate, DataPoint};
use crate::nearby::{NearbyMatch, NearbyQueryEngine};
use crate::registry::AirportRegistry;
use crate::repository::AtmosphericRepository;
use crate::tracker::FrequencyTracker;

/// The main application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    registry: Arc<AirportRegistry>,
    repository: Arc<AtmosphericRepository>,
    tracker: Arc<FrequencyTracker>,
    nearby: NearbyQueryEngine,
    health: HealthReporter,
}

impl AppState {
    /// Create a new AppState using the system clock
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a new AppState with an explicit time source
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        let registry = Arc::new(AirportRegistry::new());
        let repository = Arc::new(AtmosphericRepository::new(registry.clone(), clock));
        let tracker = Arc::new(FrequencyTracker::new(registry.clone()));
        let nearby = NearbyQueryEngine::new(registry.clone(), repository.clone(), tracker.clone());
        let health = HealthReporter::new(
            registry.clone(),
            repository.clone(),
            tracker.clone(),
            config.data.freshness_window_ms,
        );

        Self {
            config,
            registry,
            repository,
            tracker,
            nearby,
            health,
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// Register an airport from its code and location.
    ///
    /// The code must be exactly three characters and the coordinate valid;
    /// an existing airport with the same code is replaced.
    pub fn register_airport(&self, code: &str, latitude: f64, longitude: f64) -> Result<()> {
        validate_iata(code)?;
        let coordinate = Coordinate::new(latitude, longitude)?;
        self.add_airport(Airport::new(code, coordinate))
    }

    /// Register a complete airport record through the public add path.
    pub fn add_airport(&self, airport: Airport) -> Result<()> {
        validate_iata(&airport.iata)?;
        let code = airport.iata.clone();
        if !self.registry.add(airport) {
            return Err(WeatherError::InvalidCode { code });
        }
        Ok(())
    }

    /// Remove an airport and its atmospheric snapshot. Query counters are
    /// usage statistics and are kept. Removing an unknown code is a no-op.
    pub fn remove_airport(&self, code: &str) {
        let airport = self.registry.remove(code);
        let snapshot = self.repository.remove(code);
        if airport.is_some() || snapshot.is_some() {
            info!(iata = %code, "Airport deleted");
        }
    }

    /// Look up an airport by code
    pub fn get_airport(&self, code: &str) -> Result<Arc<Airport>> {
        self.registry
            .get(code)
            .ok_or_else(|| WeatherError::NotFound {
                message: format!("Airport not found: {}", code),
            })
    }

    /// All registered airport codes
    pub fn list_airport_codes(&self) -> HashSet<String> {
        self.registry.all_codes()
    }

    /// All registered airports
    pub fn list_airports(&self) -> Vec<Arc<Airport>> {
        self.registry.list()
    }

    /// Record a data point for a measurement kind given by name.
    pub fn record_measurement(&self, code: &str, kind: &str, data_point: DataPoint) -> Result<()> {
        self.repository.update(code, kind, data_point)?;
        Ok(())
    }

    /// Snapshots at and around `code`; see [`NearbyQueryEngine::find`].
    pub fn query_weather(&self, code: &str, radius_km: f64) -> Result<Vec<Arc<AtmosphericSnapshot>>> {
        Ok(self
            .query_nearby(code, radius_km)?
            .into_iter()
            .map(|m| m.snapshot)
            .collect())
    }

    /// Like [`query_weather`](Self::query_weather) but keeps codes and distances.
    pub fn query_nearby(&self, code: &str, radius_km: f64) -> Result<Vec<NearbyMatch>> {
        let matches = self.nearby.find(code, radius_km)?;
        debug!(iata = %code, radius_km, results = matches.len(), "Weather query served");
        Ok(matches)
    }

    /// Current health summary
    pub fn health_report(&self) -> HealthReport {
        self.health.report()
    }

    /// Number of registered airports
    pub fn airport_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of airports holding a snapshot
    pub fn snapshot_count(&self) -> usize {
        self.repository.len()
    }

    pub fn registry(&self) -> &Arc<AirportRegistry> {
        &self.registry
    }

    pub fn repository(&self) -> &Arc<AtmosphericRepository> {
        &self.repository
    }

    pub fn tracker(&self) -> &Arc<FrequencyTracker> {
        &self.tracker
    }
}
