//! Request statistics for the health endpoint

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::service::AirportService;
use crate::store::FrequencyStore;

/// How a query radius maps onto a histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusBucketing {
    /// Bucket = integer part of the radius
    #[default]
    Truncate,
    /// Bucket = integer part of the radius modulo 10
    Modulo10,
}

impl RadiusBucketing {
    fn index(self, radius: f64) -> usize {
        // Float to int casts saturate: negatives land in bucket 0.
        let truncated = radius.trunc() as usize;
        match self {
            RadiusBucketing::Truncate => truncated,
            RadiusBucketing::Modulo10 => truncated % 10,
        }
    }
}

pub struct StatisticService {
    airports: Arc<AirportService>,
    frequencies: Arc<FrequencyStore>,
    bucketing: RadiusBucketing,
    max_radius_km: f64,
}

impl StatisticService {
    /// Radii outside `[0, max_radius_km]` never enter the histogram, which
    /// bounds it to `max_radius_km + 1` buckets.
    pub fn new(
        airports: Arc<AirportService>,
        frequencies: Arc<FrequencyStore>,
        bucketing: RadiusBucketing,
        max_radius_km: f64,
    ) -> Self {
        Self {
            airports,
            frequencies,
            bucketing,
            max_radius_km,
        }
    }

    /// Count one query. A radius outside `[0, max_radius_km]` is not recorded.
    pub fn record_query(&self, iata: &str, radius: f64) {
        if !self.is_histogram_radius(radius) {
            debug!(iata, radius, "Radius outside the histogram range, query not recorded");
            return;
        }
        self.frequencies.record_query(iata, radius);
    }

    fn is_histogram_radius(&self, radius: f64) -> bool {
        (0.0..=self.max_radius_km).contains(&radius)
    }

    /// Share of all recorded queries per registered airport.
    ///
    /// Every registered airport appears, with `0.0` when it was never queried
    /// or when nothing has been queried yet.
    pub fn compute_request_frequencies(&self) -> HashMap<String, f64> {
        let total = self.frequencies.total_queries();

        self.airports
            .all_airports()
            .into_iter()
            .map(|airport| {
                let frequency = if total == 0 {
                    0.0
                } else {
                    self.frequencies.query_count_for(&airport.iata, 0) as f64 / total as f64
                };
                (airport.iata, frequency)
            })
            .collect()
    }

    /// Query counts per radius bucket of width 1.
    ///
    /// The length is `floor(max radius) + 1`, or a single zero bucket when no
    /// radius has been recorded. Radii written straight into the store outside
    /// `[0, max_radius_km]` are ignored.
    pub fn compute_radius_histogram(&self) -> Vec<u64> {
        let radii: Vec<f64> = self
            .frequencies
            .all_radii()
            .into_iter()
            .filter(|radius| self.is_histogram_radius(*radius))
            .collect();

        let Some(max_radius) = radii.iter().copied().reduce(f64::max) else {
            return vec![0];
        };

        let mut histogram = vec![0; max_radius.trunc() as usize + 1];
        for radius in radii {
            histogram[self.bucketing.index(radius)] += self.frequencies.radius_count(radius);
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AirportStore, AtmosphereStore};

    const IATA_CODES: [&str; 4] = ["BOS", "EWR", "LCY", "STN"];
    const RADII: [f64; 4] = [5.0, 15.0, 20.0, 5.5];

    fn service(bucketing: RadiusBucketing) -> (StatisticService, Arc<FrequencyStore>) {
        let airports = Arc::new(AirportService::new(
            Arc::new(AirportStore::new()),
            Arc::new(AtmosphereStore::new()),
        ));
        for (iata, lat, lon) in [
            ("BOS", "42.364347", "-71.005181"),
            ("EWR", "40.6925", "-74.168667"),
            ("LCY", "51.505278", "0.055278"),
            ("STN", "51.885", "0.235"),
        ] {
            airports.add_airport(iata, lat, lon).unwrap();
        }

        let frequencies = Arc::new(FrequencyStore::new());
        (
            StatisticService::new(airports, frequencies.clone(), bucketing, 40_075.0),
            frequencies,
        )
    }

    fn record_first_three_radii(service: &StatisticService) {
        for (iata, radius) in IATA_CODES.iter().zip(RADII.iter()).take(3) {
            service.record_query(iata, *radius);
        }
    }

    #[test]
    fn test_radius_histogram_without_data() {
        let (service, _) = service(RadiusBucketing::Truncate);
        assert_eq!(service.compute_radius_histogram(), vec![0]);
    }

    #[test]
    fn test_radius_histogram_distinct_radii() {
        let (service, _) = service(RadiusBucketing::Truncate);
        record_first_three_radii(&service);

        let histogram = service.compute_radius_histogram();
        assert_eq!(histogram.len(), 21);
        assert_eq!(histogram[5], 1);
        assert_eq!(histogram[15], 1);
        assert_eq!(histogram[20], 1);
        assert_eq!(histogram.iter().sum::<u64>(), 3);
    }

    #[test]
    fn test_radius_histogram_coincident_radii_share_bucket() {
        let (service, _) = service(RadiusBucketing::Truncate);
        record_first_three_radii(&service);
        service.record_query(IATA_CODES[0], RADII[3]);

        let histogram = service.compute_radius_histogram();
        assert_eq!(histogram.len(), 21);
        assert_eq!(histogram[5], 2);
        assert_eq!(histogram[15], 1);
        assert_eq!(histogram[20], 1);
    }

    #[test]
    fn test_radius_histogram_modulo_bucketing() {
        let (service, _) = service(RadiusBucketing::Modulo10);
        record_first_three_radii(&service);

        let histogram = service.compute_radius_histogram();
        assert_eq!(histogram.len(), 21);
        assert_eq!(histogram[5], 2);
        assert_eq!(histogram[0], 1);
        assert_eq!(histogram[15], 0);
    }

    #[test]
    fn test_out_of_range_radius_is_not_recorded() {
        let (service, frequencies) = service(RadiusBucketing::Truncate);
        service.record_query("BOS", 1e300);
        service.record_query("BOS", -3.0);
        service.record_query("BOS", f64::NAN);
        service.record_query("BOS", 40_075.0);

        assert_eq!(frequencies.total_queries(), 1);
        let histogram = service.compute_radius_histogram();
        assert_eq!(histogram.len(), 40_076);
        assert_eq!(histogram[40_075], 1);
    }

    #[test]
    fn test_histogram_ignores_huge_radius_in_store() {
        let (service, frequencies) = service(RadiusBucketing::Truncate);
        frequencies.record_query("BOS", 1e300);
        frequencies.record_query("BOS", f64::MAX);
        service.record_query("EWR", 5.0);

        assert_eq!(service.compute_radius_histogram(), vec![0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_request_frequencies_without_queries() {
        let (service, _) = service(RadiusBucketing::Truncate);
        let frequencies = service.compute_request_frequencies();

        assert_eq!(frequencies.len(), IATA_CODES.len());
        assert!(frequencies.values().all(|f| *f == 0.0));
    }

    #[test]
    fn test_request_frequencies_share() {
        let (service, _) = service(RadiusBucketing::Truncate);
        service.record_query("BOS", 100.0);
        for _ in 0..4 {
            service.record_query("LCY", 100.0);
        }

        let frequencies = service.compute_request_frequencies();
        assert_eq!(frequencies["BOS"], 0.2);
        assert_eq!(frequencies["LCY"], 0.8);
        assert_eq!(frequencies["EWR"], 0.0);
        assert_eq!(frequencies["STN"], 0.0);
    }

    #[test]
    fn test_unregistered_codes_do_not_appear() {
        let (service, frequencies) = service(RadiusBucketing::Truncate);
        frequencies.record_query("XXX", 1.0);
        frequencies.record_query("BOS", 1.0);

        let result = service.compute_request_frequencies();
        assert!(!result.contains_key("XXX"));
        assert_eq!(result["BOS"], 0.5);
    }
}
