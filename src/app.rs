//! Composition root wiring stores and services together

use std::sync::Arc;

use crate::config::QueryConfig;
use crate::service::{AirportService, StatisticService, WeatherService};
use crate::store::{AirportStore, AtmosphereStore, FrequencyStore};

/// One fully wired backend: a single instance of every store and service.
///
/// Independent `WeatherApp` values share nothing, so tests can build as many
/// isolated backends as they need.
pub struct WeatherApp {
    airport_store: Arc<AirportStore>,
    atmosphere_store: Arc<AtmosphereStore>,
    frequency_store: Arc<FrequencyStore>,
    airport_service: Arc<AirportService>,
    statistic_service: Arc<StatisticService>,
    weather_service: Arc<WeatherService>,
}

impl WeatherApp {
    pub fn new(query: &QueryConfig) -> Self {
        let airport_store = Arc::new(AirportStore::new());
        let atmosphere_store = Arc::new(AtmosphereStore::new());
        let frequency_store = Arc::new(FrequencyStore::new());

        let airport_service = Arc::new(AirportService::new(
            airport_store.clone(),
            atmosphere_store.clone(),
        ));
        let statistic_service = Arc::new(StatisticService::new(
            airport_service.clone(),
            frequency_store.clone(),
            query.radius_bucketing,
            query.max_radius_km,
        ));
        let weather_service = Arc::new(WeatherService::new(
            airport_service.clone(),
            atmosphere_store.clone(),
            statistic_service.clone(),
            query.max_radius_km,
        ));

        Self {
            airport_store,
            atmosphere_store,
            frequency_store,
            airport_service,
            statistic_service,
            weather_service,
        }
    }

    pub fn airports(&self) -> &Arc<AirportService> {
        &self.airport_service
    }

    pub fn weather(&self) -> &Arc<WeatherService> {
        &self.weather_service
    }

    pub fn statistics(&self) -> &Arc<StatisticService> {
        &self.statistic_service
    }

    pub fn airport_store(&self) -> &Arc<AirportStore> {
        &self.airport_store
    }

    pub fn atmosphere_store(&self) -> &Arc<AtmosphereStore> {
        &self.atmosphere_store
    }

    pub fn frequency_store(&self) -> &Arc<FrequencyStore> {
        &self.frequency_store
    }

    /// Drop every airport, snapshot and request counter
    pub fn reset(&self) {
        self.frequency_store.clear();
        self.atmosphere_store.clear();
        self.airport_store.clear();
    }
}

impl Default for WeatherApp {
    fn default() -> Self {
        Self::new(&QueryConfig::default())
    }
}
