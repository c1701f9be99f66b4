//! Atmospheric data model: data points, variable kinds and per-airport snapshots

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Statistical summary of one measured variable at one point in time.
///
/// Serialized with the collector field names `mean`, `first`, `second`,
/// `third` and `count`. Equality compares `mean` numerically, so `0.0` and
/// `-0.0` are the same reading.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct DataPoint {
    /// Mean of the observations
    pub mean: f64,
    /// First quartile, useful as a lower bound
    #[serde(rename = "first")]
    pub first_quartile: i32,
    /// Second quartile
    #[serde(rename = "second")]
    pub median: i32,
    /// Third quartile, a less noisy upper value
    #[serde(rename = "third")]
    pub third_quartile: i32,
    /// Total number of measurements
    #[serde(rename = "count")]
    pub sample_count: i32,
}

/// Half-open range `[min, max)` of accepted data point means
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedRange {
    pub min: f64,
    /// `None` means unbounded above
    pub max: Option<f64>,
}

impl AcceptedRange {
    const fn bounded(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.is_none_or(|max| value < max)
    }
}

/// The atmospheric variables a collector can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataPointType {
    Wind,
    Temperature,
    Humidity,
    Pressure,
    CloudCover,
    Precipitation,
}

impl DataPointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataPointType::Wind => "WIND",
            DataPointType::Temperature => "TEMPERATURE",
            DataPointType::Humidity => "HUMIDITY",
            DataPointType::Pressure => "PRESSURE",
            DataPointType::CloudCover => "CLOUD_COVER",
            DataPointType::Precipitation => "PRECIPITATION",
        }
    }

    pub const fn all() -> &'static [DataPointType] {
        &[
            DataPointType::Wind,
            DataPointType::Temperature,
            DataPointType::Humidity,
            DataPointType::Pressure,
            DataPointType::CloudCover,
            DataPointType::Precipitation,
        ]
    }

    /// Range a data point mean must fall into for this variable
    #[must_use]
    pub fn accepted_range(&self) -> AcceptedRange {
        match self {
            DataPointType::Wind => AcceptedRange {
                min: 0.0,
                max: None,
            },
            DataPointType::Temperature => AcceptedRange::bounded(-50.0, 100.0),
            DataPointType::Humidity => AcceptedRange::bounded(0.0, 100.0),
            DataPointType::Pressure => AcceptedRange::bounded(650.0, 800.0),
            DataPointType::CloudCover => AcceptedRange::bounded(0.0, 100.0),
            DataPointType::Precipitation => AcceptedRange::bounded(0.0, 100.0),
        }
    }

    /// Reject a data point whose mean is outside [`Self::accepted_range`]
    pub fn check(&self, point: &DataPoint) -> crate::Result<()> {
        if self.accepted_range().contains(point.mean) {
            Ok(())
        } else {
            Err(WeatherError::validation("Illegal data point value"))
        }
    }
}

impl fmt::Display for DataPointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataPointType {
    type Err = WeatherError;

    /// Case-insensitive: `wind`, `Wind` and `WIND` all parse.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.to_ascii_uppercase();

        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == upper)
            .ok_or_else(|| WeatherError::validation("Illegal weather data type"))
    }
}

/// Latest atmospheric snapshot for one airport.
///
/// Holds at most one current data point per variable. `last_update_time` is
/// the epoch-millisecond timestamp of the most recent update of any variable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AtmosphericInformation {
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
    #[serde(default)]
    pub last_update_time: i64,
}

impl AtmosphericInformation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, kind: DataPointType) -> &mut Option<DataPoint> {
        match kind {
            DataPointType::Wind => &mut self.wind,
            DataPointType::Temperature => &mut self.temperature,
            DataPointType::Humidity => &mut self.humidity,
            DataPointType::Pressure => &mut self.pressure,
            DataPointType::CloudCover => &mut self.cloud_cover,
            DataPointType::Precipitation => &mut self.precipitation,
        }
    }

    #[must_use]
    pub fn get(&self, kind: DataPointType) -> Option<&DataPoint> {
        match kind {
            DataPointType::Wind => self.wind.as_ref(),
            DataPointType::Temperature => self.temperature.as_ref(),
            DataPointType::Humidity => self.humidity.as_ref(),
            DataPointType::Pressure => self.pressure.as_ref(),
            DataPointType::CloudCover => self.cloud_cover.as_ref(),
            DataPointType::Precipitation => self.precipitation.as_ref(),
        }
    }

    /// Replace the data point for `kind` and stamp the update time
    pub fn set(&mut self, kind: DataPointType, point: DataPoint, updated_at_ms: i64) {
        *self.slot_mut(kind) = Some(point);
        self.last_update_time = updated_at_ms;
    }

    /// True when no variable has been set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        DataPointType::all().iter().all(|kind| self.get(*kind).is_none())
    }

    /// True when the last update happened less than `window_ms` before `now_ms`
    #[must_use]
    pub fn is_updated_within(&self, now_ms: i64, window_ms: i64) -> bool {
        now_ms - self.last_update_time < window_ms
    }
}
