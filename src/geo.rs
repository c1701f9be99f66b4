//! Great-circle distance between coordinates

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for airport distances, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6372.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Haversine distance in kilometers between `from` and `to`
#[must_use]
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
