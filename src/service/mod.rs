//! Use-case services over the in-memory stores
//!
//! Services validate input, orchestrate store calls and return typed
//! [`crate::WeatherError`] values. They never log business errors.

pub mod airport_service;
pub mod statistic_service;
pub mod weather_service;

pub use airport_service::AirportService;
pub use statistic_service::{RadiusBucketing, StatisticService};
pub use weather_service::{FRESHNESS_WINDOW_MS, WeatherService};
