//! Error types shared across the service.
//!
//! Every failure that can reach a caller is normalized into one of the
//! variants below. Internal detail is logged at the boundary; response
//! bodies carry a stable error label plus an optional human-readable
//! message.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field path as it appears in the request body
    pub field: String,
    /// Human-readable description of the violation
    pub message: String,
}

/// Error types for service operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed schema constraints; carries the full ordered list of
    /// field violations
    #[error("invalid request data")]
    Validation(Vec<FieldViolation>),

    /// A required external-service credential or setting is missing
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The external generation service failed or returned an unusable payload
    #[error("generation service error: {0}")]
    GenerationService(String),

    /// Missing or invalid credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Record does not exist (or is not visible to the caller)
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness or state conflict
    #[error("conflict: {0}")]
    Conflict(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other internal fault
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a validation error from a single field violation.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation(vec![FieldViolation {
            field: field.into(),
            message: message.into(),
        }])
    }
}

impl From<ValidationErrors> for Error {
    /// Flatten `validator` output into an ordered violation list.
    ///
    /// Fields are sorted by path so the same invalid input always produces
    /// the same response.
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .errors()
            .iter()
            .filter_map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(field_errors) => Some((field, field_errors)),
                _ => None,
            })
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| FieldViolation {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("validation failed: {}", e.code)),
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
        Error::Validation(violations)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Error::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid request data",
                    "details": violations,
                }),
            ),
            Error::Configuration(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "Service configuration error",
                    "message": message,
                }),
            ),
            Error::GenerationService(message) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Generation failed",
                    "message": message,
                }),
            ),
            Error::Unauthorized(message) => {
                tracing::debug!(reason = %message, "unauthorized request");
                (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" }))
            }
            Error::Forbidden(message) => {
                tracing::debug!(reason = %message, "forbidden request");
                (StatusCode::FORBIDDEN, json!({ "error": "Forbidden" }))
            }
            Error::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Not found", "message": message }),
            ),
            Error::Conflict(message) => (
                StatusCode::CONFLICT,
                json!({ "error": "Conflict", "message": message }),
            ),
            Error::Database(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            Error::Internal(message) => {
                tracing::error!(detail = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_single() {
        let err = Error::validation("topic", "topic must be at least 3 characters");
        match err {
            Error::Validation(v) => {
                assert_eq!(v.len(), 1);
                assert_eq!(v[0].field, "topic");
            }
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                Error::validation("f", "m").into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::Configuration("no key".into()).into_response().status(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                Error::GenerationService("empty".into()).into_response().status(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                Error::Unauthorized("no token".into()).into_response().status(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                Error::NotFound("post".into()).into_response().status(),
                StatusCode::NOT_FOUND,
            ),
            (
                Error::Conflict("email".into()).into_response().status(),
                StatusCode::CONFLICT,
            ),
            (
                Error::Internal("boom".into()).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (got, want) in cases {
            assert_eq!(got, want);
        }
    }
}
