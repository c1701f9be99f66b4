use std::collections::HashMap;

use parking_lot::RwLock;

use crate::models::AtmosphericInformation;

/// Latest atmospheric snapshot per airport code
#[derive(Debug, Default)]
pub struct AtmosphereStore {
    snapshots: RwLock<HashMap<String, AtmosphericInformation>>,
}

impl AtmosphereStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, iata: &str) -> Option<AtmosphericInformation> {
        self.snapshots.read().get(iata).cloned()
    }

    pub fn all(&self) -> Vec<AtmosphericInformation> {
        self.snapshots.read().values().cloned().collect()
    }

    /// Insert or fully replace the snapshot for `iata`
    pub fn save(&self, iata: &str, info: AtmosphericInformation) {
        self.snapshots.write().insert(iata.to_string(), info);
    }

    /// Read-modify-write under a single write lock. A missing snapshot starts
    /// out empty. Returns a copy of the stored result.
    pub fn update<F>(&self, iata: &str, apply: F) -> AtmosphericInformation
    where
        F: FnOnce(&mut AtmosphericInformation),
    {
        let mut snapshots = self.snapshots.write();
        let info = snapshots.entry(iata.to_string()).or_default();
        apply(info);
        info.clone()
    }

    pub fn delete(&self, iata: &str) {
        self.snapshots.write().remove(iata);
    }

    pub fn clear(&self) {
        self.snapshots.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataPoint, DataPointType};

    fn wind() -> DataPoint {
        DataPoint {
            mean: 5.0,
            sample_count: 10,
            ..DataPoint::default()
        }
    }

    #[test]
    fn test_save_replaces_snapshot() {
        let store = AtmosphereStore::new();
        let mut info = AtmosphericInformation::new();
        info.set(DataPointType::Wind, wind(), 1);
        store.save("BOS", info.clone());
        assert_eq!(store.find("BOS"), Some(info));

        store.save("BOS", AtmosphericInformation::new());
        assert!(store.find("BOS").is_some_and(|info| info.is_empty()));
    }

    #[test]
    fn test_update_creates_missing_snapshot() {
        let store = AtmosphereStore::new();
        let stored = store.update("EWR", |info| info.set(DataPointType::Wind, wind(), 7));

        assert_eq!(stored.wind, Some(wind()));
        assert_eq!(store.find("EWR"), Some(stored));
    }

    #[test]
    fn test_update_keeps_other_variables() {
        let store = AtmosphereStore::new();
        store.update("EWR", |info| info.set(DataPointType::Wind, wind(), 1));
        store.update("EWR", |info| info.set(DataPointType::Humidity, wind(), 2));

        let info = store.find("EWR").unwrap();
        assert!(info.wind.is_some());
        assert!(info.humidity.is_some());
        assert_eq!(info.last_update_time, 2);
    }

    #[test]
    fn test_delete_and_clear() {
        let store = AtmosphereStore::new();
        store.save("BOS", AtmosphericInformation::new());
        store.save("EWR", AtmosphericInformation::new());

        store.delete("BOS");
        assert!(store.find("BOS").is_none());
        assert_eq!(store.all().len(), 1);

        store.clear();
        assert!(store.all().is_empty());
    }
}
