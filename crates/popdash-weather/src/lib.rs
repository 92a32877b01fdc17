//! Weather lookup for Popdash
//!
//! One outbound request per city change against the OpenWeatherMap current
//! weather endpoint; no caching, no retries.

pub mod client;
pub mod types;

pub use client::WeatherClient;
pub use types::{WeatherError, WeatherSnapshot};
