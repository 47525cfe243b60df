//! Airport registry.
//!
//! Maps IATA codes to airport records. Reads vastly outnumber writes
//! (registration is an administrative or bulk-load operation), so the map sits
//! behind a `parking_lot::RwLock` and records are shared as `Arc<Airport>`.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error};

use crate::model::Airport;

/// Concurrent map from IATA code to airport.
#[derive(Debug, Default)]
pub struct AirportRegistry {
    airports: RwLock<HashMap<String, Arc<Airport>>>,
}

impl AirportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an airport by its IATA code.
    ///
    /// An airport with an empty code is rejected and logged; the registry is
    /// left unchanged. Returns whether the airport was stored.
    pub fn add(&self, airport: Airport) -> bool {
        if airport.iata.trim().is_empty() {
            error!(airport = %airport, "Cannot save airport without an IATA code");
            return false;
        }

        let code = airport.iata.clone();
        let replaced = self
            .airports
            .write()
            .insert(code.clone(), Arc::new(airport))
            .is_some();
        debug!(iata = %code, replaced, "Airport stored");
        true
    }

    /// Look up an airport by code
    pub fn get(&self, code: &str) -> Option<Arc<Airport>> {
        self.airports.read().get(code).cloned()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.airports.read().contains_key(code)
    }

    /// Remove an airport. Returns the removed record, `None` if it was absent.
    pub fn remove(&self, code: &str) -> Option<Arc<Airport>> {
        let removed = self.airports.write().remove(code);
        if removed.is_some() {
            debug!(iata = %code, "Airport removed");
        }
        removed
    }

    /// Point-in-time copy of all airports, in no particular order.
    ///
    /// The records are shared, so the copy only clones pointers.
    pub fn list(&self) -> Vec<Arc<Airport>> {
        self.airports.read().values().cloned().collect()
    }

    /// Point-in-time copy of all registered codes
    pub fn all_codes(&self) -> HashSet<String> {
        self.airports.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.airports.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;

    fn airport(code: &str, lat: f64, lon: f64) -> Airport {
        Airport::new(code, Coordinate::new(lat, lon).unwrap())
    }

    #[test]
    fn test_add_and_get() {
        let registry = AirportRegistry::new();
        let bos = airport("BOS", 42.364347, -71.005181).with_city("Boston");
        assert!(registry.add(bos.clone()));

        let fetched = registry.get("BOS").unwrap();
        assert_eq!(*fetched, bos);
        assert!(registry.get("JFK").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_overwrites() {
        let registry = AirportRegistry::new();
        registry.add(airport("BOS", 42.0, -71.0));
        registry.add(airport("BOS", 42.5, -71.5).with_city("Boston"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("BOS").unwrap().city, "Boston");
    }

    #[test]
    fn test_rejects_empty_code() {
        let registry = AirportRegistry::new();
        assert!(!registry.add(airport("", 0.0, 0.0)));
        assert!(!registry.add(airport("   ", 0.0, 0.0)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = AirportRegistry::new();
        registry.add(airport("EWR", 40.6925, -74.168667));

        assert!(registry.remove("EWR").is_some());
        assert!(registry.remove("EWR").is_none());
        assert!(!registry.contains("EWR"));
    }

    #[test]
    fn test_list_and_codes() {
        let registry = AirportRegistry::new();
        registry.add(airport("JFK", 40.639751, -73.778925));
        registry.add(airport("LGA", 40.777245, -73.872608));

        let codes = registry.all_codes();
        assert_eq!(
            codes,
            HashSet::from(["JFK".to_string(), "LGA".to_string()])
        );

        let listed: HashSet<String> = registry.list().iter().map(|a| a.iata.clone()).collect();
        assert_eq!(listed, codes);
    }
}
