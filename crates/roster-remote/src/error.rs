//! Remote adapter errors

use roster_core::DomainError;
use thiserror::Error;

use crate::payload::PayloadError;

/// Errors raised while talking to the platform
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Unreadable response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("No member data found after trying every source")]
    NoData,
}

impl RemoteError {
    pub(crate) fn transport(url: &str, err: &reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn decode(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<RemoteError> for DomainError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NoData => DomainError::RemoteUnavailable(err.to_string()),
            other => DomainError::RemoteTransport(other.to_string()),
        }
    }
}
