//! Atmospheric repository.
//!
//! Holds the latest [`AtmosphericSnapshot`] of every airport that has received
//! a measurement. Snapshots are never mutated while visible: an update reads
//! the current `Arc`, builds a modified copy and installs it with a
//! compare-and-swap on the pointer. A writer that loses the race rebuilds from
//! the snapshot that beat it, so concurrent updates of different kinds on the
//! same airport are all kept.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::error::{Result, WeatherError};
use crate::model::{AtmosphericSnapshot, DataPoint, MeasurementKind};
use crate::registry::AirportRegistry;

/// Concurrent store of per-airport snapshots.
#[derive(Debug)]
pub struct AtmosphericRepository {
    snapshots: DashMap<String, Arc<AtmosphericSnapshot>>,
    registry: Arc<AirportRegistry>,
    clock: Arc<dyn Clock>,
    empty: Arc<AtmosphericSnapshot>,
}

impl AtmosphericRepository {
    pub fn new(registry: Arc<AirportRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self {
            snapshots: DashMap::with_capacity(1000),
            registry,
            clock,
            empty: Arc::new(AtmosphericSnapshot::empty()),
        }
    }

    /// Current snapshot of an airport, or the empty snapshot if it has none.
    ///
    /// Does not consult the registry: an unknown code also yields the empty
    /// snapshot.
    pub fn get(&self, code: &str) -> Arc<AtmosphericSnapshot> {
        self.snapshots
            .get(code)
            .map(|entry| Arc::clone(entry.value()))
            .unwrap_or_else(|| Arc::clone(&self.empty))
    }

    /// Record a data point for `kind` (matched case-insensitively).
    ///
    /// Validation happens before anything is written, so a failed call leaves
    /// the repository untouched. The airport is checked before the kind.
    /// Returns the snapshot that was installed.
    pub fn update(
        &self,
        code: &str,
        kind: &str,
        data_point: DataPoint,
    ) -> Result<Arc<AtmosphericSnapshot>> {
        self.ensure_registered(code)?;
        let kind: MeasurementKind = kind.parse()?;
        self.write(code, kind, data_point)
    }

    /// Typed variant of [`update`](Self::update).
    pub fn update_kind(
        &self,
        code: &str,
        kind: MeasurementKind,
        data_point: DataPoint,
    ) -> Result<Arc<AtmosphericSnapshot>> {
        self.ensure_registered(code)?;
        self.write(code, kind, data_point)
    }

    fn ensure_registered(&self, code: &str) -> Result<()> {
        if self.registry.contains(code) {
            Ok(())
        } else {
            Err(WeatherError::UnknownAirport {
                code: code.to_string(),
            })
        }
    }

    fn write(
        &self,
        code: &str,
        kind: MeasurementKind,
        data_point: DataPoint,
    ) -> Result<Arc<AtmosphericSnapshot>> {
        kind.validate(&data_point)?;

        let installed = self.install(code, kind, data_point);
        self.keep_if_registered(code, &installed)?;

        debug!(iata = %code, kind = %kind, mean = data_point.mean, "Measurement recorded");
        Ok(installed)
    }

    /// The airport may have been removed while we were writing. If so, take
    /// back our own snapshot (only if nobody replaced it since).
    fn keep_if_registered(&self, code: &str, installed: &Arc<AtmosphericSnapshot>) -> Result<()> {
        if self.registry.contains(code) {
            return Ok(());
        }
        self.snapshots
            .remove_if(code, |_, current| Arc::ptr_eq(current, installed));
        debug!(iata = %code, "Airport removed during update, snapshot withdrawn");
        Err(WeatherError::UnknownAirport {
            code: code.to_string(),
        })
    }

    /// Optimistic read-copy-swap loop. Never fails; retries until its swap wins.
    fn install(
        &self,
        code: &str,
        kind: MeasurementKind,
        data_point: DataPoint,
    ) -> Arc<AtmosphericSnapshot> {
        let mut attempt = 0u32;
        loop {
            let current = self
                .snapshots
                .get(code)
                .map(|entry| Arc::clone(entry.value()));
            let base = current.as_deref().unwrap_or(self.empty.as_ref());
            let next = Arc::new(base.with_measurement(kind, data_point, self.clock.now_millis()));

            if self.compare_and_swap(code, current.as_ref(), Arc::clone(&next)) {
                return next;
            }

            attempt += 1;
            trace!(iata = %code, kind = %kind, attempt, "Snapshot changed underneath update, retrying");
        }
    }

    /// Install `next` only if the stored snapshot is still `expected`
    /// (pointer identity; `None` means "no snapshot yet").
    fn compare_and_swap(
        &self,
        code: &str,
        expected: Option<&Arc<AtmosphericSnapshot>>,
        next: Arc<AtmosphericSnapshot>,
    ) -> bool {
        match self.snapshots.entry(code.to_string()) {
            Entry::Occupied(mut entry) => match expected {
                Some(expected) if Arc::ptr_eq(entry.get(), expected) => {
                    entry.insert(next);
                    true
                }
                _ => false,
            },
            Entry::Vacant(entry) => {
                if expected.is_none() {
                    entry.insert(next);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Drop an airport's snapshot. No-op if it has none.
    pub fn remove(&self, code: &str) -> Option<Arc<AtmosphericSnapshot>> {
        self.snapshots.remove(code).map(|(_, snapshot)| snapshot)
    }

    /// Point-in-time copy of every stored snapshot with its airport code
    pub fn entries(&self) -> Vec<(String, Arc<AtmosphericSnapshot>)> {
        self.snapshots
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect()
    }

    /// Number of airports with a stored snapshot
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Current time according to the repository's clock
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }
}
