//! Open-Meteo current conditions.
//! Free, no API key required.

use std::sync::Arc;
use std::time::Duration;

use pomabamba_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use reqwest::Client;
use serde::Deserialize;

use crate::types::{Coordinates, WeatherError, WeatherReading};

const OPEN_METEO_URL: &str = "https://api.open-meteo.com";
const DEFAULT_TIMEZONE: &str = "America/Lima";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    weather_code: i32,
    #[serde(default)]
    relative_humidity_2m: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    timezone: String,
}

impl WeatherProvider {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(OPEN_METEO_URL, DEFAULT_TIMEZONE)
    }

    pub fn with_base_url(base_url: &str, timezone: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            timezone: timezone.to_string(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::with_base_url(&config.api_base_url, &config.timezone)
    }

    /// Current temperature and condition at `coords`, plus relative humidity
    /// when `include_humidity` is set.
    pub async fn fetch_current(
        &self,
        coords: Coordinates,
        include_humidity: bool,
    ) -> Result<WeatherReading, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let current = if include_humidity {
            "temperature_2m,relative_humidity_2m,weather_code"
        } else {
            "temperature_2m,weather_code"
        };

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("current", current.to_string()),
                ("timezone", self.timezone.clone()),
            ])
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: "Open-Meteo request failed".to_string(),
            }
            .into());
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let current = body
            .current
            .ok_or_else(|| WeatherError::Parse("response has no current block".to_string()))?;

        let humidity = if include_humidity {
            current.relative_humidity_2m
        } else {
            None
        };

        let reading =
            WeatherReading::from_observation(current.temperature_2m, current.weather_code, humidity);
        tracing::debug!("Open-Meteo reading: {}", reading.summary());
        Ok(reading)
    }
}
