//! Application error types
//!
//! Errors raised while wiring the application together: configuration,
//! storage bootstrap, the platform client and the HTTP listener.

use roster_core::DomainError;
use serde::Serialize;

use crate::config::ConfigError;

/// Startup and infrastructure failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    /// The platform client could not be built
    #[error("Remote client error: {0}")]
    Remote(String),

    /// Bind or serve failure of the HTTP listener
    #[error("Server error: {0}")]
    Server(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Machine-readable code, used as a log field
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Remote(_) => "REMOTE_CLIENT_ERROR",
            Self::Server(_) => "SERVER_ERROR",
            Self::Domain(e) => e.code(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Error body shared by every JSON error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
