//! Atmospheric updates, radius queries and health status

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};

use crate::error::WeatherError;
use crate::geo;
use crate::models::{AtmosphericInformation, DataPoint, DataPointType, HealthStatus};
use crate::service::{AirportService, StatisticService};
use crate::store::AtmosphereStore;
use crate::Result;

/// Snapshots updated less than this long ago count towards the health data size
pub const FRESHNESS_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

pub struct WeatherService {
    airports: Arc<AirportService>,
    atmosphere: Arc<AtmosphereStore>,
    statistics: Arc<StatisticService>,
    max_radius_km: f64,
}

impl WeatherService {
    pub fn new(
        airports: Arc<AirportService>,
        atmosphere: Arc<AtmosphereStore>,
        statistics: Arc<StatisticService>,
        max_radius_km: f64,
    ) -> Self {
        Self {
            airports,
            atmosphere,
            statistics,
            max_radius_km,
        }
    }

    /// Store a collected data point for one variable of an airport.
    ///
    /// `point_type` is matched case-insensitively against the
    /// [`DataPointType`] names (`wind`, `cloud_cover`, ...).
    ///
    /// # Errors
    /// - `NotFound` when the airport is not registered
    /// - `Validation` for an unknown variable or a mean outside its range
    #[instrument(level = "debug", skip(self, point))]
    pub fn add_data_point(&self, iata: &str, point_type: &str, point: DataPoint) -> Result<()> {
        self.airports.ensure_exists(iata)?;

        let kind: DataPointType = point_type.parse()?;
        kind.check(&point)?;

        let now = Utc::now().timestamp_millis();
        self.atmosphere
            .update(iata, |info| info.set(kind, point, now));

        debug!(%kind, mean = point.mean, "Data point stored");
        Ok(())
    }

    /// Weather of `iata` and of every airport within `radius` kilometers.
    ///
    /// A zero radius returns only the airport's own snapshot. Snapshots without
    /// any variable set are left out. Successful queries are counted for the
    /// health statistics.
    ///
    /// # Errors
    /// - `NotFound` when the airport is not registered
    /// - `Format` when the radius is negative, not finite or above the
    ///   configured maximum
    #[instrument(level = "debug", skip(self))]
    pub fn get_airport_weather(&self, iata: &str, radius: f64) -> Result<Vec<AtmosphericInformation>> {
        self.airports.ensure_exists(iata)?;
        self.check_radius(radius)?;

        let weather = if radius == 0.0 {
            self.atmosphere
                .find(iata)
                .filter(|info| !info.is_empty())
                .into_iter()
                .collect()
        } else {
            self.weather_within_radius(iata, radius)?
        };

        self.statistics.record_query(iata, radius);

        debug!(results = weather.len(), "Weather query answered");
        Ok(weather)
    }

    fn weather_within_radius(&self, iata: &str, radius: f64) -> Result<Vec<AtmosphericInformation>> {
        let center = self.airports.coordinate_of(iata)?;

        Ok(self
            .airports
            .all_airports()
            .into_iter()
            .filter(|airport| geo::distance_km(center, airport.coordinate()) <= radius)
            .filter_map(|airport| self.atmosphere.find(&airport.iata))
            .filter(|info| !info.is_empty())
            .collect())
    }

    fn check_radius(&self, radius: f64) -> Result<()> {
        if !radius.is_finite() || radius < 0.0 || radius > self.max_radius_km {
            return Err(WeatherError::format(
                "radius",
                format!("Radius should be within [0, {}] km.", self.max_radius_km),
            ));
        }
        Ok(())
    }

    pub fn health_status(&self) -> HealthStatus {
        self.health_status_at(Utc::now().timestamp_millis())
    }

    /// Health status as seen at `now_ms` (epoch milliseconds)
    pub fn health_status_at(&self, now_ms: i64) -> HealthStatus {
        let data_size_within_24h = self
            .atmosphere
            .all()
            .iter()
            .filter(|info| !info.is_empty() && info.is_updated_within(now_ms, FRESHNESS_WINDOW_MS))
            .count();

        HealthStatus {
            data_size_within_24h,
            request_frequency_per_airport: self.statistics.compute_request_frequencies(),
            radius_histogram: self.statistics.compute_radius_histogram(),
        }
    }
}
