//! Health status reported by the query API

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Aggregated operational metrics
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct HealthStatus {
    /// Snapshots that carry weather and were updated in the last 24 hours
    #[serde(rename = "datasize")]
    pub data_size_within_24h: usize,
    /// Share of all queries per registered airport, in [0, 1]
    #[serde(rename = "iata_freq")]
    pub request_frequency_per_airport: HashMap<String, f64>,
    /// Query counts bucketed by radius
    #[serde(rename = "radius_freq")]
    pub radius_histogram: Vec<u64>,
}
