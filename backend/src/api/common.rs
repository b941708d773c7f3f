//! Boundary translation from `ServiceError` to HTTP responses.
//!
//! This is the only place status codes are chosen; services and
//! middleware deal purely in error kinds.

use crate::errors::ServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::Validation { message }
            | ServiceError::AlreadyExists { message }
            | ServiceError::PermissionDenied { message } => {
                (StatusCode::FORBIDDEN, message.clone())
            }
            ServiceError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message.clone()),
            ServiceError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            ServiceError::Database { source } => {
                tracing::error!(error = %source, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServiceError::Internal { message } => {
                tracing::error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
