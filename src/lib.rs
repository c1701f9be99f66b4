//! `airweather` - In-memory airport weather backend
//!
//! Collectors register airports and push atmospheric data points; clients
//! query the weather around an airport and read request statistics.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod geo;
pub mod loader;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;
pub mod web;

// Re-export core types for public API
pub use app::WeatherApp;
pub use config::AirweatherConfig;
pub use error::{ErrorCode, WeatherError};
pub use models::{Airport, AtmosphericInformation, DataPoint, DataPointType, HealthStatus};
pub use service::{AirportService, RadiusBucketing, StatisticService, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;
