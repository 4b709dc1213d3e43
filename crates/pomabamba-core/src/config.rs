use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides the content API base URL.
pub const API_URL_ENV: &str = "PUBLIC_API_URL";

const DEFAULT_CONTENT_API_URL: &str = "https://api.example.com";
const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com";
const DEFAULT_TIMEZONE: &str = "America/Lima";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a summary of all errors joined by `; `
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Content API settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Weather widget settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Base URL of the tours/festivities API (without the `/api/...` path)
    #[serde(default = "default_content_api_url")]
    pub api_base_url: String,
}

fn default_content_api_url() -> String {
    DEFAULT_CONTENT_API_URL.to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_content_api_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo host
    #[serde(default = "default_weather_api_url")]
    pub api_base_url: String,

    /// Refresh interval in minutes
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,

    /// IANA timezone passed to the forecast endpoint
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_weather_api_url() -> String {
    DEFAULT_WEATHER_API_URL.to_string()
}

fn default_refresh_minutes() -> u32 {
    30
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_weather_api_url(),
            refresh_minutes: default_refresh_minutes(),
            timezone: default_timezone(),
        }
    }
}

impl WeatherConfig {
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.refresh_minutes) * 60)
    }
}

impl Config {
    /// Load configuration from the platform config directory, creating the
    /// default file if it doesn't exist, then apply `PUBLIC_API_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_api_url_override(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Load configuration from an explicit path, creating it with defaults
    /// when missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        Self::load()?.into_validated()
    }

    fn into_validated(self) -> Result<(Self, ValidationResult), ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((self, validation))
    }

    /// Replace the content API base URL when an override is present and non-empty.
    pub fn apply_api_url_override(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Content API URL overridden by {}", API_URL_ENV);
            self.content.api_base_url = url.trim().to_string();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_url(
            &self.content.api_base_url,
            "content.api_base_url",
            &mut result,
        );
        Self::validate_url(
            &self.weather.api_base_url,
            "weather.api_base_url",
            &mut result,
        );

        if self.weather.refresh_minutes == 0 {
            result.add_error(
                "weather.refresh_minutes",
                "Refresh interval must be greater than 0",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        if self.weather.timezone.trim().is_empty() {
            result.add_error("weather.timezone", "Timezone must not be empty");
        }

        result
    }

    fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Write(e.to_string()))?;

        std::fs::write(path, contents).map_err(|e| ConfigError::Write(e.to_string()))
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("pomabamba");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_default_refresh_is_thirty_minutes() {
        let config = Config::default();
        assert_eq!(config.weather.refresh_minutes, 30);
        assert_eq!(
            config.weather.refresh_interval(),
            std::time::Duration::from_secs(1800)
        );
        assert_eq!(config.weather.timezone, "America/Lima");
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.content.api_base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "content.api_base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.api_base_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_refresh_is_error() {
        let mut config = Config::default();
        config.weather.refresh_minutes = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.refresh_minutes"));
    }

    #[test]
    fn test_long_refresh_is_warning() {
        let mut config = Config::default();
        config.weather.refresh_minutes = 2000;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.refresh_minutes"));
    }

    #[test]
    fn test_api_url_override() {
        let mut config = Config::default();
        config.apply_api_url_override(Some(" https://turismo.example.org ".to_string()));
        assert_eq!(config.content.api_base_url, "https://turismo.example.org");

        config.apply_api_url_override(Some("   ".to_string()));
        assert_eq!(config.content.api_base_url, "https://turismo.example.org");

        config.apply_api_url_override(None);
        assert_eq!(config.content.api_base_url, "https://turismo.example.org");
    }

    #[test]
    fn test_into_validated_rejects_errors() {
        let mut config = Config::default();
        config.weather.timezone = String::new();
        let err = config.into_validated().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("weather.timezone")));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.content.api_base_url, "https://api.example.com");

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.weather.refresh_minutes, config.weather.refresh_minutes);
    }

    #[test]
    fn test_load_from_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[content]\napi_base_url = \"http://localhost:4321\"\n\n[weather]\nrefresh_minutes = 10\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.content.api_base_url, "http://localhost:4321");
        assert_eq!(config.weather.refresh_minutes, 10);
        assert_eq!(config.weather.api_base_url, "https://api.open-meteo.com");
        assert_eq!(config.weather.timezone, "America/Lima");
    }

    #[test]
    fn test_load_from_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "content = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert_eq!(summary, "field1: error1; field2: error2");
    }
}
