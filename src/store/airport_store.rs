use std::collections::BTreeSet;

use parking_lot::RwLock;

use crate::models::Airport;

/// Registry of known airports
#[derive(Debug, Default)]
pub struct AirportStore {
    airports: RwLock<Vec<Airport>>,
}

impl AirportStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, iata: &str) -> Option<Airport> {
        self.airports
            .read()
            .iter()
            .find(|airport| airport.iata == iata)
            .cloned()
    }

    pub fn exists(&self, iata: &str) -> bool {
        self.airports
            .read()
            .iter()
            .any(|airport| airport.iata == iata)
    }

    /// Snapshot copy of every registered airport
    pub fn all(&self) -> Vec<Airport> {
        self.airports.read().clone()
    }

    pub fn all_codes(&self) -> BTreeSet<String> {
        self.airports
            .read()
            .iter()
            .map(|airport| airport.iata.clone())
            .collect()
    }

    /// Unconditional insert. Callers check uniqueness first.
    pub fn add(&self, iata: &str, latitude: f64, longitude: f64) -> Airport {
        let airport = Airport::new(iata, latitude, longitude);
        self.airports.write().push(airport.clone());
        airport
    }

    /// Remove every airport whose code matches `iata` ignoring ASCII case.
    /// Returns whether anything was removed.
    pub fn delete(&self, iata: &str) -> bool {
        !self.remove_matching(iata).is_empty()
    }

    /// Same match as [`Self::delete`], returning the exact codes removed
    pub fn remove_matching(&self, iata: &str) -> Vec<String> {
        let mut airports = self.airports.write();
        let mut removed = Vec::new();
        airports.retain(|airport| {
            let matches = airport.iata.eq_ignore_ascii_case(iata);
            if matches {
                removed.push(airport.iata.clone());
            }
            !matches
        });
        removed
    }

    pub fn clear(&self) {
        self.airports.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_find() {
        let store = AirportStore::new();
        let added = store.add("BOS", 42.364347, -71.005181);

        assert_eq!(store.find("BOS"), Some(added));
        assert!(store.exists("BOS"));
        assert!(!store.exists("bos"));
        assert_eq!(store.find("JFK"), None);
    }

    #[test]
    fn test_all_is_a_snapshot() {
        let store = AirportStore::new();
        store.add("BOS", 42.364347, -71.005181);

        let snapshot = store.all();
        store.add("EWR", 40.6925, -74.168667);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.all().len(), 2);
        assert_eq!(
            store.all_codes().into_iter().collect::<Vec<_>>(),
            vec!["BOS".to_string(), "EWR".to_string()]
        );
    }

    #[test]
    fn test_delete_is_case_insensitive() {
        let store = AirportStore::new();
        store.add("BOS", 42.364347, -71.005181);

        assert!(store.delete("bos"));
        assert!(!store.exists("BOS"));
        assert!(!store.delete("BOS"));
    }

    #[test]
    fn test_remove_matching_reports_exact_codes() {
        let store = AirportStore::new();
        store.add("BOS", 42.364347, -71.005181);
        store.add("bos", 1.0, 1.0);
        store.add("EWR", 40.6925, -74.168667);

        let mut removed = store.remove_matching("Bos");
        removed.sort();
        assert_eq!(removed, vec!["BOS".to_string(), "bos".to_string()]);
        assert_eq!(store.all_codes().into_iter().collect::<Vec<_>>(), vec!["EWR"]);
    }

    #[test]
    fn test_clear() {
        let store = AirportStore::new();
        store.add("BOS", 42.364347, -71.005181);
        store.add("EWR", 40.6925, -74.168667);
        store.clear();
        assert!(store.all().is_empty());
    }
}
