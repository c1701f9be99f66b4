//! Airport registration and lookup
//!
//! Validates collector input before it reaches the airport and atmosphere
//! stores. Registering an airport also seeds its empty atmospheric snapshot;
//! deleting it removes both.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::WeatherError;
use crate::geo::{self, Coordinate};
use crate::models::{Airport, AtmosphericInformation};
use crate::store::{AirportStore, AtmosphereStore};
use crate::Result;

const IATA_CODE_LENGTH: usize = 3;

pub struct AirportService {
    airports: Arc<AirportStore>,
    atmosphere: Arc<AtmosphereStore>,
}

impl AirportService {
    pub fn new(airports: Arc<AirportStore>, atmosphere: Arc<AtmosphereStore>) -> Self {
        Self {
            airports,
            atmosphere,
        }
    }

    /// Register a new airport from collector input.
    ///
    /// Latitude and longitude arrive as strings and are parsed here.
    ///
    /// # Errors
    /// - `Duplicate` when `iata` is already registered
    /// - `Format` when `iata` is blank or not three characters long, when a
    ///   coordinate is not a number, or when it is outside [-90, 90] / [-180, 180]
    pub fn add_airport(&self, iata: &str, latitude: &str, longitude: &str) -> Result<Airport> {
        if self.airports.exists(iata) {
            return Err(WeatherError::duplicate_airport(iata));
        }
        check_iata_format(iata)?;

        let latitude = parse_coordinate(latitude)?;
        let longitude = parse_coordinate(longitude)?;
        check_coordinate_range(latitude, longitude)?;

        self.atmosphere.save(iata, AtmosphericInformation::new());
        let airport = self.airports.add(iata, latitude, longitude);

        debug!(iata, latitude, longitude, "Airport registered");
        Ok(airport)
    }

    pub fn get_airport(&self, iata: &str) -> Result<Airport> {
        self.airports
            .find(iata)
            .ok_or_else(|| WeatherError::airport_not_found(iata))
    }

    /// Fail with `NotFound` unless `iata` is registered
    pub fn ensure_exists(&self, iata: &str) -> Result<()> {
        if self.airports.exists(iata) {
            Ok(())
        } else {
            Err(WeatherError::airport_not_found(iata))
        }
    }

    /// Remove the airport and its atmospheric snapshot.
    ///
    /// The code matches ignoring ASCII case, so every differently cased
    /// registration goes too, together with its snapshot.
    pub fn delete_airport(&self, iata: &str) -> Result<bool> {
        self.ensure_exists(iata)?;

        let removed = self.airports.remove_matching(iata);
        for code in &removed {
            self.atmosphere.delete(code);
        }

        debug!(iata, removed = removed.len(), "Airport deleted");
        Ok(!removed.is_empty())
    }

    pub fn all_airports(&self) -> Vec<Airport> {
        self.airports.all()
    }

    pub fn all_airport_codes(&self) -> BTreeSet<String> {
        self.airports.all_codes()
    }

    /// Great-circle distance between two airports in kilometers
    #[must_use]
    pub fn calculate_distance(&self, from: &Airport, to: &Airport) -> f64 {
        geo::distance_km(from.coordinate(), to.coordinate())
    }

    pub(crate) fn coordinate_of(&self, iata: &str) -> Result<Coordinate> {
        self.get_airport(iata).map(|airport| airport.coordinate())
    }
}

fn check_iata_format(iata: &str) -> Result<()> {
    if iata.trim().is_empty() || iata.chars().count() != IATA_CODE_LENGTH {
        return Err(WeatherError::format(
            "IATA Code",
            "IATA Code should contain 3 characters.",
        ));
    }
    Ok(())
}

fn parse_coordinate(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| WeatherError::format("latitude/longitude", format!("`{value}` is not a number.")))
}

fn check_coordinate_range(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(WeatherError::format(
            "latitude/longitude",
            "Should be Latitude [-90, 90], longitude [-180, 180].",
        ));
    }
    Ok(())
}
