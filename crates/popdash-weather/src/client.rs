//! Weather API client.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use crate::types::{WeatherError, WeatherSnapshot};

const WEATHER_API_BASE: &str = "https://api.openweathermap.org";
const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Status code the API uses for a successful lookup.
const SUCCESS_COD: i64 = 200;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    // Number on success, string on most error payloads.
    cod: serde_json::Value,
    message: Option<String>,
    weather: Option<Vec<ApiCondition>>,
    main: Option<ApiMain>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
}

impl ApiResponse {
    fn cod(&self) -> Option<i64> {
        match &self.cod {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Client for the OpenWeatherMap current weather endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: &str) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, WEATHER_API_BASE)
    }

    /// Build a client against an explicit base URL (tests point this at a
    /// mock server).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current weather for `city` in metric units.
    ///
    /// The payload's own status field decides success: anything other than
    /// 200 fails with `WeatherError::Api` carrying the payload's message,
    /// matching how the provider reports unknown cities inside an otherwise
    /// parseable body.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("invalid weather payload: {}", e)))?;

        match body.cod() {
            Some(SUCCESS_COD) => {}
            Some(cod) => {
                let message = body
                    .message
                    .unwrap_or_else(|| format!("status code {}", cod));
                return Err(WeatherError::Api(message));
            }
            None => {
                return Err(WeatherError::Parse("missing status code field".to_string()));
            }
        }

        let condition = body
            .weather
            .as_ref()
            .and_then(|w| w.first())
            .ok_or_else(|| WeatherError::Parse("missing weather conditions".to_string()))?;
        let main = body
            .main
            .as_ref()
            .ok_or_else(|| WeatherError::Parse("missing main block".to_string()))?;

        let snapshot = WeatherSnapshot {
            description: condition.description.clone(),
            temperature_celsius: main.temp,
            icon_url: format!("{}/{}@2x.png", ICON_URL_BASE, condition.icon),
        };

        tracing::info!(
            "Weather for {}: {} at {}°C",
            city,
            snapshot.description,
            snapshot.temperature_celsius
        );
        Ok(snapshot)
    }
}
