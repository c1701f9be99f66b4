//! In-memory stores shared by the services
//!
//! Each store guards its own state with a reader/writer lock. There is no
//! transaction spanning two stores.

pub mod airport_store;
pub mod atmosphere_store;
pub mod frequency_store;

pub use airport_store::AirportStore;
pub use atmosphere_store::AtmosphereStore;
pub use frequency_store::FrequencyStore;
