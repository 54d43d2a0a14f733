//! Service layer errors
//!
//! Every failure a handler can see, with the HTTP status and machine code it
//! maps to. Port failures keep their `DomainError` so the code survives.

use roster_core::DomainError;
use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    /// Rule violation or port failure
    Domain(DomainError),

    NotFound { resource: &'static str, id: String },

    /// Rejected input
    Validation(String),

    /// The write lock is held by a sync run or another manual write
    SyncInProgress,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => e.fmt(f),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::SyncInProgress => f.write_str("A synchronization run is already in progress"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::SyncInProgress => 409,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::SyncInProgress => "SYNC_IN_PROGRESS",
        }
    }
}

// Remote failures map to 502
fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_validation() {
        400
    } else if e.is_conflict() {
        409
    } else if e.is_remote() {
        502
    } else {
        500
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
