//! Measurement kinds, their valid ranges, and summarized readings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, WeatherError};

/// The atmospheric quantities a collector can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeasurementKind {
    /// Wind speed in km/h
    Wind,
    /// Temperature in degrees celsius
    Temperature,
    /// Humidity in percent
    Humidity,
    /// Pressure in mmHg
    Pressure,
    /// Cloud cover in percent
    CloudCover,
    /// Precipitation in cm
    Precipitation,
}

/// Valid range for the mean of a measurement: `min` inclusive, `max` exclusive.
///
/// A `max` of `None` means the kind has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl MeasurementRange {
    const fn new(min: f64, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies in `[min, max)`. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        match self.max {
            Some(max) => value >= self.min && value < max,
            None => value >= self.min,
        }
    }
}

impl MeasurementKind {
    /// All kinds, in snapshot field order
    pub const ALL: [MeasurementKind; 6] = [
        MeasurementKind::Wind,
        MeasurementKind::Temperature,
        MeasurementKind::Humidity,
        MeasurementKind::Pressure,
        MeasurementKind::CloudCover,
        MeasurementKind::Precipitation,
    ];

    /// Canonical upper-case name
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementKind::Wind => "WIND",
            MeasurementKind::Temperature => "TEMPERATURE",
            MeasurementKind::Humidity => "HUMIDITY",
            MeasurementKind::Pressure => "PRESSURE",
            MeasurementKind::CloudCover => "CLOUDCOVER",
            MeasurementKind::Precipitation => "PRECIPITATION",
        }
    }

    /// Valid range for the mean of this kind.
    ///
    /// WIND is only bounded below.
    pub fn range(&self) -> MeasurementRange {
        match self {
            MeasurementKind::Wind => MeasurementRange::new(0.0, None),
            MeasurementKind::Temperature => MeasurementRange::new(-50.0, Some(100.0)),
            MeasurementKind::Humidity => MeasurementRange::new(0.0, Some(100.0)),
            MeasurementKind::Pressure => MeasurementRange::new(650.0, Some(800.0)),
            MeasurementKind::CloudCover => MeasurementRange::new(0.0, Some(100.0)),
            MeasurementKind::Precipitation => MeasurementRange::new(0.0, Some(100.0)),
        }
    }

    /// Check a data point against this kind's range.
    pub fn validate(&self, data_point: &DataPoint) -> Result<()> {
        let range = self.range();
        if range.contains(data_point.mean) {
            Ok(())
        } else {
            Err(WeatherError::OutOfRange {
                kind: *self,
                value: data_point.mean,
                min: range.min,
                max: range.max.unwrap_or(f64::INFINITY),
            })
        }
    }
}

impl FromStr for MeasurementKind {
    type Err = WeatherError;

    /// Case-insensitive match against the canonical names.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MeasurementKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| WeatherError::InvalidKind {
                kind: s.to_string(),
            })
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary of one measurement kind's recent readings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPoint {
    /// Mean of the observations
    pub mean: f64,
    /// First quartile
    pub first: f64,
    /// Second quartile (median)
    pub median: f64,
    /// Third quartile
    pub last: f64,
    /// Number of observations
    pub count: u32,
}

impl DataPoint {
    pub fn new(mean: f64, first: f64, median: f64, last: f64, count: u32) -> Self {
        Self {
            mean,
            first,
            median,
            last,
            count,
        }
    }
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean={} q1={} median={} q3={} count={}",
            self.mean, self.first, self.median, self.last, self.count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_mean(mean: f64) -> DataPoint {
        DataPoint::new(mean, 0.0, 0.0, 0.0, 1)
    }

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!("wind".parse::<MeasurementKind>().unwrap(), MeasurementKind::Wind);
        assert_eq!(
            "CloudCover".parse::<MeasurementKind>().unwrap(),
            MeasurementKind::CloudCover
        );
        assert_eq!(
            "PRECIPITATION".parse::<MeasurementKind>().unwrap(),
            MeasurementKind::Precipitation
        );
        assert!(matches!(
            "cloud_cover".parse::<MeasurementKind>(),
            Err(WeatherError::InvalidKind { .. })
        ));
        assert!("".parse::<MeasurementKind>().is_err());
    }

    #[test]
    fn test_range_bounds() {
        // Lower bound inclusive, upper exclusive
        assert!(MeasurementKind::Humidity.validate(&with_mean(0.0)).is_ok());
        assert!(MeasurementKind::Humidity.validate(&with_mean(99.99)).is_ok());
        assert!(MeasurementKind::Humidity.validate(&with_mean(100.0)).is_err());
        assert!(MeasurementKind::Humidity.validate(&with_mean(-0.1)).is_err());

        assert!(MeasurementKind::Temperature.validate(&with_mean(-50.0)).is_ok());
        assert!(MeasurementKind::Temperature.validate(&with_mean(-50.5)).is_err());

        assert!(MeasurementKind::Pressure.validate(&with_mean(649.9)).is_err());
        assert!(MeasurementKind::Pressure.validate(&with_mean(650.0)).is_ok());
        assert!(MeasurementKind::Pressure.validate(&with_mean(800.0)).is_err());
    }

    #[test]
    fn test_wind_has_no_upper_bound() {
        assert!(MeasurementKind::Wind.validate(&with_mean(5000.0)).is_ok());
        assert!(MeasurementKind::Wind.validate(&with_mean(-1.0)).is_err());
    }

    #[test]
    fn test_nan_is_rejected() {
        for kind in MeasurementKind::ALL {
            assert!(kind.validate(&with_mean(f64::NAN)).is_err(), "{kind}");
        }
    }

    #[test]
    fn test_data_point_json_defaults() {
        let dp: DataPoint = serde_json::from_str(r#"{"mean": 22.0, "count": 10}"#).unwrap();
        assert_eq!(dp, DataPoint::new(22.0, 0.0, 0.0, 0.0, 10));
    }
}
