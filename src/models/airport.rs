//! Airport model

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A registered airport, identified by its three-letter IATA code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Airport {
    /// Three-letter IATA code
    pub iata: String,
    /// Latitude in decimal degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, [-180, 180]
    pub longitude: f64,
}

impl Airport {
    #[must_use]
    pub fn new(iata: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            iata: iata.into(),
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
