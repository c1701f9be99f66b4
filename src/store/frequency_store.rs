use std::collections::HashMap;

use parking_lot::RwLock;

/// Radii are keyed by their bit pattern, with `-0.0` folded into `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RadiusKey(u64);

impl RadiusKey {
    fn new(radius: f64) -> Self {
        let radius = if radius == 0.0 { 0.0 } else { radius };
        Self(radius.to_bits())
    }

    fn radius(self) -> f64 {
        f64::from_bits(self.0)
    }
}

#[derive(Debug, Default)]
struct Counters {
    by_iata: HashMap<String, u64>,
    by_radius: HashMap<RadiusKey, u64>,
}

/// Query volume counters per airport code and per radius
#[derive(Debug, Default)]
pub struct FrequencyStore {
    counters: RwLock<Counters>,
}

impl FrequencyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one query. Both counters move under the same write lock.
    pub fn record_query(&self, iata: &str, radius: f64) {
        let mut counters = self.counters.write();
        *counters.by_iata.entry(iata.to_string()).or_insert(0) += 1;
        *counters.by_radius.entry(RadiusKey::new(radius)).or_insert(0) += 1;
    }

    pub fn clear(&self) {
        let mut counters = self.counters.write();
        counters.by_iata.clear();
        counters.by_radius.clear();
    }

    pub fn total_queries(&self) -> u64 {
        self.counters.read().by_iata.values().sum()
    }

    pub fn query_count_for(&self, iata: &str, default: u64) -> u64 {
        self.counters
            .read()
            .by_iata
            .get(iata)
            .copied()
            .unwrap_or(default)
    }

    /// Distinct radii seen so far, in no particular order
    pub fn all_radii(&self) -> Vec<f64> {
        self.counters
            .read()
            .by_radius
            .keys()
            .map(|key| key.radius())
            .collect()
    }

    pub fn radius_count(&self, radius: f64) -> u64 {
        self.counters
            .read()
            .by_radius
            .get(&RadiusKey::new(radius))
            .copied()
            .unwrap_or(0)
    }
}
