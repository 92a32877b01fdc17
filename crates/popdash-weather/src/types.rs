use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transient result of a single weather query. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Human-readable condition, e.g. "scattered clouds".
    pub description: String,
    /// Metric temperature.
    pub temperature_celsius: f64,
    /// Fully resolved icon image URL.
    pub icon_url: String,
}

/// Weather lookup errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The API answered with a non-success status code; carries the payload's
    /// message field.
    #[error("Weather API error: {0}")]
    Api(String),

    /// The network call itself failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The payload was missing expected fields.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(msg) => format!("Weather service error: {}", msg),
            Self::Network(_) => "Unable to reach the weather service. Check your connection."
                .to_string(),
            Self::Parse(_) => "Received an unexpected weather response.".to_string(),
        }
    }
}
