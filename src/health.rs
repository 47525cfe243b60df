//! Health report over the stores and counters.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::registry::AirportRegistry;
use crate::repository::AtmosphericRepository;
use crate::tracker::{FrequencyTracker, MAX_RADIUS_BUCKET};

/// Default freshness window: 24 hours in ms
pub const DEFAULT_FRESHNESS_WINDOW_MS: i64 = 86_400_000;

/// Health summary of the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    /// Airports with data updated inside the freshness window
    pub datasize: usize,
    /// Per registered airport: its request count divided by the number of
    /// distinct airports ever queried
    pub iata_freq: BTreeMap<String, f64>,
    /// Request counts folded by `bucket % 10`
    pub radius_freq: Vec<u64>,
}

/// Read-only aggregation over registry, repository and tracker.
#[derive(Debug)]
pub struct HealthReporter {
    registry: Arc<AirportRegistry>,
    repository: Arc<AtmosphericRepository>,
    tracker: Arc<FrequencyTracker>,
    freshness_window_ms: i64,
}

impl HealthReporter {
    pub fn new(
        registry: Arc<AirportRegistry>,
        repository: Arc<AtmosphericRepository>,
        tracker: Arc<FrequencyTracker>,
        freshness_window_ms: i64,
    ) -> Self {
        Self {
            registry,
            repository,
            tracker,
            freshness_window_ms,
        }
    }

    /// Build the report. Has no side effects on any component.
    pub fn report(&self) -> HealthReport {
        let now = self.repository.now_millis();
        let datasize = self
            .repository
            .entries()
            .iter()
            .filter(|(_, snapshot)| snapshot.is_fresh(now, self.freshness_window_ms))
            .count();

        let frequencies = self.tracker.snapshot();

        // The denominator is the number of distinct airports queried, not the
        // total number of queries, so the fractions need not sum to 1.
        let queried = frequencies.distinct_airports();
        let iata_freq = self
            .registry
            .all_codes()
            .into_iter()
            .map(|code| {
                let fraction = if queried == 0 {
                    0.0
                } else {
                    frequencies.request_count(&code) as f64 / queried as f64
                };
                (code, fraction)
            })
            .collect();

        let max_observed = frequencies.radii.keys().next_back().copied().unwrap_or(0);
        let slots = (max_observed as usize + 1).max(MAX_RADIUS_BUCKET as usize + 1);
        let mut radius_freq = vec![0u64; slots];
        for (bucket, count) in &frequencies.radii {
            radius_freq[(*bucket % 10) as usize] += count;
        }

        HealthReport {
            datasize,
            iata_freq,
            radius_freq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{Airport, Coordinate, DataPoint};

    const HOUR_MS: i64 = 3_600_000;

    struct Fixture {
        clock: Arc<ManualClock>,
        repository: Arc<AtmosphericRepository>,
        tracker: Arc<FrequencyTracker>,
        reporter: HealthReporter,
    }

    fn fixture(codes: &[&str]) -> Fixture {
        let registry = Arc::new(AirportRegistry::new());
        for code in codes {
            registry.add(Airport::new(*code, Coordinate::new(10.0, 10.0).unwrap()));
        }
        let clock = Arc::new(ManualClock::new(100 * 24 * HOUR_MS));
        let repository = Arc::new(AtmosphericRepository::new(registry.clone(), clock.clone()));
        let tracker = Arc::new(FrequencyTracker::new(registry.clone()));
        let reporter = HealthReporter::new(
            registry,
            repository.clone(),
            tracker.clone(),
            DEFAULT_FRESHNESS_WINDOW_MS,
        );
        Fixture {
            clock,
            repository,
            tracker,
            reporter,
        }
    }

    fn dp(mean: f64) -> DataPoint {
        DataPoint::new(mean, 0.0, 0.0, 0.0, 1)
    }

    #[test]
    fn test_empty_report() {
        let f = fixture(&["BOS", "JFK"]);
        let report = f.reporter.report();
        assert_eq!(report.datasize, 0);
        assert_eq!(report.iata_freq.len(), 2);
        assert!(report.iata_freq.values().all(|v| *v == 0.0));
        assert_eq!(report.radius_freq.len(), 1001);
        assert!(report.radius_freq.iter().all(|v| *v == 0));
    }

    #[test]
    fn test_datasize_excludes_stale() {
        let f = fixture(&["BOS", "JFK", "LGA"]);
        f.repository.update("BOS", "wind", dp(5.0)).unwrap();
        f.clock.advance(25 * HOUR_MS);
        f.repository.update("JFK", "humidity", dp(50.0)).unwrap();

        let report = f.reporter.report();
        assert_eq!(report.datasize, 1);
    }

    #[test]
    fn test_iata_freq_uses_distinct_airport_denominator() {
        let f = fixture(&["BOS", "JFK", "LGA"]);
        f.tracker.record_query("BOS", 0.0);
        f.tracker.record_query("BOS", 0.0);
        f.tracker.record_query("BOS", 0.0);
        f.tracker.record_query("JFK", 0.0);

        let report = f.reporter.report();
        assert_eq!(report.iata_freq["BOS"], 1.5);
        assert_eq!(report.iata_freq["JFK"], 0.5);
        assert_eq!(report.iata_freq["LGA"], 0.0);
    }

    #[test]
    fn test_radius_freq_folds_modulo_ten() {
        let f = fixture(&["BOS"]);
        f.tracker.record_query("BOS", 3.0);
        f.tracker.record_query("BOS", 13.9);
        f.tracker.record_query("BOS", 1200.0);
        f.tracker.record_query("BOS", -5.0);

        let report = f.reporter.report();
        assert_eq!(report.radius_freq.len(), 1001);
        assert_eq!(report.radius_freq[3], 2);
        assert_eq!(report.radius_freq[0], 2);
        assert_eq!(report.radius_freq.iter().sum::<u64>(), 4);
    }

    #[test]
    fn test_report_has_no_side_effects() {
        let f = fixture(&["BOS"]);
        f.tracker.record_query("BOS", 10.0);
        let before = f.tracker.snapshot();
        let first = f.reporter.report();
        let second = f.reporter.report();
        assert_eq!(first, second);
        assert_eq!(f.tracker.snapshot(), before);
    }
}
