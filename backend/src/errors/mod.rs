//! Global application error types.
//!
//! This module defines the error kinds shared by every flow in the
//! backend. Flows return `ServiceResult<T>`; the translation to HTTP
//! status codes and JSON bodies happens once, at the API boundary
//! (see `api::common`).

use thiserror::Error;

/// Generic service error used across all flows.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Validation or business-rule violation (missing fields, bad
    /// format, weak password, consumed/invalid tokens).
    #[error("{message}")]
    Validation { message: String },

    /// Missing, malformed, invalid or expired bearer credential.
    #[error("{message}")]
    Unauthorized { message: String },

    /// Caller lacks the permission the operation requires.
    #[error("{message}")]
    PermissionDenied { message: String },

    /// The target record does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// A uniqueness constraint would be violated.
    #[error("{message}")]
    AlreadyExists { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
