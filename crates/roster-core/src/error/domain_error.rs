//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid row range: {0}")]
    InvalidRange(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Nickname already registered: {0}")]
    NicknameTaken(String),

    // =========================================================================
    // Remote Platform Errors
    // =========================================================================
    #[error("Remote platform returned no member data: {0}")]
    RemoteUnavailable(String),

    #[error("Remote transport error: {0}")]
    RemoteTransport(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::CollectionNotFound(_) => "UNKNOWN_COLLECTION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRange(_) => "INVALID_RANGE",

            // Conflict
            Self::NicknameTaken(_) => "NICKNAME_TAKEN",

            // Remote
            Self::RemoteUnavailable(_) => "REMOTE_UNAVAILABLE",
            Self::RemoteTransport(_) => "REMOTE_TRANSPORT_ERROR",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_) | Self::CollectionNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidRange(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::NicknameTaken(_))
    }

    /// Check if the remote platform could not be reached or decoded
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_) | Self::RemoteTransport(_))
    }
}
