//! Content-specific error types.

use pomabamba_core::NetworkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    /// Transport failure or non-2xx status.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Body was not the expected JSON array.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Body decoded but broke a collection invariant.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl ContentError {
    /// Whether the failure came from the remote side rather than local setup.
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(self, Self::Client(_))
    }
}
