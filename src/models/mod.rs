//! Data models for the airweather service
//!
//! This module contains the core domain models organized by concern:
//! - Airport: registered airports and their coordinates
//! - Atmosphere: data points and per-airport atmospheric snapshots
//! - Health: aggregated operational metrics

pub mod airport;
pub mod atmosphere;
pub mod health;

// Re-export all public types for convenient access
pub use airport::Airport;
pub use atmosphere::{AcceptedRange, AtmosphericInformation, DataPoint, DataPointType};
pub use health::HealthStatus;
