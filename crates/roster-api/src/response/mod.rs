//! Response types and error handling for API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_common::ErrorResponse;
use roster_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid header {0}")]
    InvalidHeader(&'static str),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let raw = match self {
            Self::Service(e) => e.status_code(),
            Self::Validation(_) | Self::InvalidBody(_) | Self::InvalidQuery(_) | Self::InvalidHeader(_) => 400,
        };
        StatusCode::from_u16(raw).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Service(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidHeader(_) => "INVALID_HEADER",
        }
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let details = if let Self::Validation(errors) = &self {
            serde_json::to_value(errors).ok()
        } else {
            None
        };

        let body = ErrorBody {
            error: ErrorResponse {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::DomainError;

    #[test]
    fn test_service_errors_keep_their_status() {
        let err = ApiError::from(ServiceError::SyncInProgress);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "SYNC_IN_PROGRESS");

        let err = ApiError::from(ServiceError::not_found("Member", "m-1"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::from(ServiceError::from(DomainError::RemoteUnavailable("no data".to_string())));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "REMOTE_UNAVAILABLE");
    }

    #[test]
    fn test_request_errors_are_bad_requests() {
        assert_eq!(ApiError::invalid_body("eof").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidHeader("x-operator-id").error_code(), "INVALID_HEADER");
    }
}
