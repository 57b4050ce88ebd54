//! Typed error handling for the hoard API
//!
//! Every failure a handler can surface is one of the variants below, so
//! clients can match on a stable `code` instead of parsing messages.
//!
//! # Error Categories
//!
//! - `NotFound`: unknown identifier on an item operation
//! - `Validation`: one or more field-level violations (422, full list carried)
//! - `BadRequest`: malformed input shape (wrong JSON types, bad identifiers)
//! - `Internal`: storage or framework failures that should not happen

use crate::core::validation::Violation;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The error type surfaced by handlers and mapped to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// No entity of the given resource type has this id
    NotFound { resource: &'static str, id: Uuid },

    /// The write was rejected; carries every violation, not just the first
    Validation(Vec<Violation>),

    /// The request payload or parameters have the wrong shape
    BadRequest(String),

    /// Storage or framework failure
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
            ApiError::Validation(violations) => {
                write!(f, "Validation failed with {} violation(s)", violations.len())
            }
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::NotFound { resource, id } => Some(serde_json::json!({
                "resource": resource,
                "id": id.to_string()
            })),
            ApiError::Validation(violations) => {
                Some(serde_json::json!({ "violations": violations }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
