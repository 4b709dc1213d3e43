//! Shared error types.
//!
//! Content and weather fetches never surface errors to visitors (they fall
//! back to seed or default data), but they still classify what went wrong so
//! the diagnostic that gets logged is precise.

use thiserror::Error;

/// Network-related errors (HTTP, connectivity, payload shape).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No configuration directory available on this platform")]
    NoConfigDir,

    #[error("Failed to read configuration: {0}")]
    Read(String),

    #[error("Failed to write configuration: {0}")]
    Write(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid("weather.timezone: Timezone must not be empty".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: weather.timezone: Timezone must not be empty"
        );
    }

    #[test]
    fn test_server_error_display_includes_status() {
        let err = NetworkError::ServerError {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "Server error: 502 - bad gateway");
    }
}
