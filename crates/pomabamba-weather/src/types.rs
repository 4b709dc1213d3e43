use chrono::{DateTime, Utc};
use pomabamba_core::NetworkError;
use serde::{Deserialize, Serialize};

/// Label and pictogram for a WMO weather interpretation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCondition {
    pub description: &'static str,
    pub pictogram: &'static str,
}

impl WeatherCondition {
    /// What unmapped codes resolve to.
    pub const UNKNOWN: Self = Self::new("Variable", "🌤️");

    const fn new(description: &'static str, pictogram: &'static str) -> Self {
        Self {
            description,
            pictogram,
        }
    }

    /// Map a WMO weather code. Total: codes outside the table give [`Self::UNKNOWN`].
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::new("Despejado", "☀️"),
            1 => Self::new("Mayormente despejado", "🌤️"),
            2 => Self::new("Parcialmente nublado", "⛅"),
            3 => Self::new("Nublado", "☁️"),
            45 => Self::new("Neblina", "🌫️"),
            48 => Self::new("Neblina helada", "🌫️"),
            51 => Self::new("Llovizna ligera", "🌦️"),
            53 => Self::new("Llovizna", "🌦️"),
            55 => Self::new("Llovizna intensa", "🌧️"),
            56 => Self::new("Llovizna helada", "🌨️"),
            57 => Self::new("Llovizna helada intensa", "🌨️"),
            61 => Self::new("Lluvia ligera", "🌧️"),
            63 => Self::new("Lluvia", "🌧️"),
            65 => Self::new("Lluvia intensa", "🌧️"),
            66 => Self::new("Lluvia helada", "🌨️"),
            67 => Self::new("Lluvia helada intensa", "🌨️"),
            71 => Self::new("Nevada ligera", "❄️"),
            73 => Self::new("Nevada", "❄️"),
            75 => Self::new("Nevada intensa", "❄️"),
            77 => Self::new("Granizo", "🌨️"),
            80 => Self::new("Chubascos ligeros", "🌦️"),
            81 => Self::new("Chubascos", "🌧️"),
            82 => Self::new("Chubascos intensos", "⛈️"),
            85 => Self::new("Nevada ligera", "🌨️"),
            86 => Self::new("Nevada intensa", "🌨️"),
            95 => Self::new("Tormenta", "⛈️"),
            96 => Self::new("Tormenta con granizo", "⛈️"),
            99 => Self::new("Tormenta severa", "⛈️"),
            _ => Self::UNKNOWN,
        }
    }
}

/// Point the widget reports weather for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What a weather widget displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Whole degrees Celsius
    pub temperature: i32,
    pub description: String,
    pub pictogram: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
}

impl WeatherReading {
    pub fn new(temperature: i32, condition: WeatherCondition, humidity: Option<u8>) -> Self {
        Self {
            temperature,
            description: condition.description.to_string(),
            pictogram: condition.pictogram.to_string(),
            humidity,
        }
    }

    /// Build a reading from raw API values.
    pub fn from_observation(temperature_c: f64, weather_code: i32, humidity: Option<f64>) -> Self {
        Self::new(
            round_half_up(temperature_c),
            WeatherCondition::from_wmo_code(weather_code),
            humidity.map(|h| round_half_up(h).clamp(0, 100) as u8),
        )
    }

    /// Short label, e.g. `⛅ 12° Parcialmente nublado`.
    pub fn summary(&self) -> String {
        format!("{} {}° {}", self.pictogram, self.temperature, self.description)
    }
}

/// Round to the nearest integer with halves going up, so -0.5 becomes 0 and
/// 2.5 becomes 3.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Snapshot of a widget: replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeatherState {
    /// `None` only before the first fetch of a widget that starts empty.
    pub reading: Option<WeatherReading>,
    pub loading: bool,
    /// Indicator shown next to the reading when it's a fallback.
    pub error: Option<String>,
    pub last_success: Option<DateTime<Utc>>,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
