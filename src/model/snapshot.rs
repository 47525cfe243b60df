//! Per-airport atmospheric snapshots.

use serde::{Deserialize, Serialize};

use super::measurement::{DataPoint, MeasurementKind};

/// The latest data point of each measurement kind for one airport.
///
/// Snapshots are immutable once published; an update builds a new value with
/// [`AtmosphericSnapshot::with_measurement`] and swaps it in whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtmosphericSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<DataPoint>,
    /// Milliseconds since the UTC epoch of the last successful update, 0 if never updated
    #[serde(default)]
    pub last_update_time: i64,
}

impl AtmosphericSnapshot {
    /// The snapshot of an airport that has never received a measurement.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Data point of the given kind, if set
    pub fn get(&self, kind: MeasurementKind) -> Option<&DataPoint> {
        self.slot(kind).as_ref()
    }

    fn slot(&self, kind: MeasurementKind) -> &Option<DataPoint> {
        match kind {
            MeasurementKind::Wind => &self.wind,
            MeasurementKind::Temperature => &self.temperature,
            MeasurementKind::Humidity => &self.humidity,
            MeasurementKind::Pressure => &self.pressure,
            MeasurementKind::CloudCover => &self.cloud_cover,
            MeasurementKind::Precipitation => &self.precipitation,
        }
    }

    fn slot_mut(&mut self, kind: MeasurementKind) -> &mut Option<DataPoint> {
        match kind {
            MeasurementKind::Wind => &mut self.wind,
            MeasurementKind::Temperature => &mut self.temperature,
            MeasurementKind::Humidity => &mut self.humidity,
            MeasurementKind::Pressure => &mut self.pressure,
            MeasurementKind::CloudCover => &mut self.cloud_cover,
            MeasurementKind::Precipitation => &mut self.precipitation,
        }
    }

    /// A copy of this snapshot with `kind` replaced by `data_point` and the
    /// update time set to `now_ms`. `self` is left untouched.
    pub fn with_measurement(
        &self,
        kind: MeasurementKind,
        data_point: DataPoint,
        now_ms: i64,
    ) -> Self {
        let mut next = self.clone();
        *next.slot_mut(kind) = Some(data_point);
        next.last_update_time = now_ms;
        next
    }

    /// Whether at least one measurement kind is set
    pub fn has_data(&self) -> bool {
        MeasurementKind::ALL
            .iter()
            .any(|kind| self.slot(*kind).is_some())
    }

    /// Kinds that currently hold a data point
    pub fn kinds(&self) -> impl Iterator<Item = MeasurementKind> + '_ {
        MeasurementKind::ALL
            .into_iter()
            .filter(move |kind| self.slot(*kind).is_some())
    }

    /// Whether this snapshot carries data updated strictly within
    /// `window_ms` milliseconds before `now_ms`.
    pub fn is_fresh(&self, now_ms: i64, window_ms: i64) -> bool {
        self.has_data() && self.last_update_time > now_ms.saturating_sub(window_ms)
    }
}
