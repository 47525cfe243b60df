//! Query frequency counters.
//!
//! Two monotonic histograms: requests per airport code and requests per
//! radius bucket. Counters live in `DashMap`s of atomics so increments from
//! any number of handlers never lose updates, and are only reset by a restart.

use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::registry::AirportRegistry;

/// Upper clamp for radius buckets, in km
pub const MAX_RADIUS_BUCKET: u32 = 1000;

/// Map a caller-supplied radius to its counter key.
///
/// The radius is clamped to `[0, MAX_RADIUS_BUCKET]` and truncated to an
/// integer; NaN lands in bucket 0.
pub fn radius_bucket(radius: f64) -> u32 {
    if radius.is_nan() {
        return 0;
    }
    radius.clamp(0.0, f64::from(MAX_RADIUS_BUCKET)) as u32
}

/// Race-free copy of the counters for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencySnapshot {
    /// Requests per airport code
    pub requests: HashMap<String, u64>,
    /// Requests per radius bucket
    pub radii: BTreeMap<u32, u64>,
}

impl FrequencySnapshot {
    /// Number of distinct airports that have been queried at least once
    pub fn distinct_airports(&self) -> usize {
        self.requests.len()
    }

    /// Total number of recorded queries
    pub fn total_requests(&self) -> u64 {
        self.requests.values().sum()
    }

    pub fn request_count(&self, code: &str) -> u64 {
        self.requests.get(code).copied().unwrap_or(0)
    }
}

/// Per-airport and per-radius query counters.
#[derive(Debug)]
pub struct FrequencyTracker {
    requests: DashMap<String, AtomicU64>,
    radii: DashMap<u32, AtomicU64>,
    registry: Arc<AirportRegistry>,
}

impl FrequencyTracker {
    pub fn new(registry: Arc<AirportRegistry>) -> Self {
        Self {
            requests: DashMap::new(),
            radii: DashMap::new(),
            registry,
        }
    }

    /// Count one query for `code` with the caller's raw `radius`.
    ///
    /// Codes are resolved through the registry; a query for an unregistered
    /// airport touches neither counter. Returns whether it was counted.
    pub fn record_query(&self, code: &str, radius: f64) -> bool {
        if !self.registry.contains(code) {
            debug!(iata = %code, "Query for unregistered airport not counted");
            return false;
        }

        match self.requests.get(code) {
            Some(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.requests
                    .entry(code.to_string())
                    .or_insert_with(|| AtomicU64::new(0))
                    .fetch_add(1, Ordering::Relaxed);
            }
        }

        let bucket = radius_bucket(radius);
        self.radii
            .entry(bucket)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);

        true
    }

    /// Current request count for an airport, 0 if never queried
    pub fn request_count(&self, code: &str) -> u64 {
        self.requests
            .get(code)
            .map(|counter| counter.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Copy every counter out for reporting.
    pub fn snapshot(&self) -> FrequencySnapshot {
        FrequencySnapshot {
            requests: self
                .requests
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().load(Ordering::Relaxed)))
                .collect(),
            radii: self
                .radii
                .iter()
                .map(|entry| (*entry.key(), entry.value().load(Ordering::Relaxed)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Airport, Coordinate};

    fn tracker_with(codes: &[&str]) -> FrequencyTracker {
        let registry = Arc::new(AirportRegistry::new());
        for code in codes {
            registry.add(Airport::new(*code, Coordinate::new(0.0, 0.0).unwrap()));
        }
        FrequencyTracker::new(registry)
    }

    #[test]
    fn test_radius_bucket_clamping() {
        assert_eq!(radius_bucket(1200.0), 1000);
        assert_eq!(radius_bucket(-5.0), 0);
        assert_eq!(radius_bucket(200.7), 200);
        assert_eq!(radius_bucket(500.0), 500);
        assert_eq!(radius_bucket(1000.0), 1000);
        assert_eq!(radius_bucket(f64::NAN), 0);
        assert_eq!(radius_bucket(f64::INFINITY), 1000);
    }

    #[test]
    fn test_record_query_counts() {
        let tracker = tracker_with(&["BOS", "JFK"]);
        assert!(tracker.record_query("BOS", 0.0));
        assert!(tracker.record_query("BOS", 1200.0));
        assert!(tracker.record_query("JFK", -5.0));

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.request_count("BOS"), 2);
        assert_eq!(snapshot.request_count("JFK"), 1);
        assert_eq!(snapshot.distinct_airports(), 2);
        assert_eq!(snapshot.total_requests(), 3);
        assert_eq!(snapshot.radii, BTreeMap::from([(0, 2), (1000, 1)]));
        assert_eq!(tracker.request_count("BOS"), 2);
    }

    #[test]
    fn test_unregistered_code_not_counted() {
        let tracker = tracker_with(&["BOS"]);
        assert!(!tracker.record_query("XXX", 100.0));
        assert_eq!(tracker.snapshot(), FrequencySnapshot::default());
    }

    #[test]
    fn test_concurrent_increments_are_exact() {
        let tracker = tracker_with(&["BOS", "JFK"]);
        let threads = 8;
        let per_thread = 1_000;

        std::thread::scope(|scope| {
            for t in 0..threads {
                let tracker = &tracker;
                scope.spawn(move || {
                    let code = if t % 2 == 0 { "BOS" } else { "JFK" };
                    for i in 0..per_thread {
                        tracker.record_query(code, (i % 3) as f64);
                    }
                });
            }
        });

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.total_requests(), (threads * per_thread) as u64);
        assert_eq!(snapshot.request_count("BOS"), (threads / 2 * per_thread) as u64);
        assert_eq!(
            snapshot.radii.values().sum::<u64>(),
            (threads * per_thread) as u64
        );
    }
}
