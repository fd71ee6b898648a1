//! Service error types with HTTP status code mapping.
//!
//! [`CatalogError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::claims::TokenError;
use crate::domain::EventId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "validation failed",
///     "details": [{"field": "title", "message": "must be at least 3 characters"}]
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`CatalogError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details (field-level validation errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Name of the offending payload field.
    pub field: &'static str,
    /// What was wrong with it.
    pub message: String,
}

impl FieldError {
    /// Creates a field error for `field` with the given message.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Which authorization condition an actor failed.
///
/// Both map to HTTP 403 but stay distinguishable for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    /// The principal's role does not permit the action.
    Role,
    /// The role permits the action but the principal is not the creator.
    Ownership,
}

impl std::fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Role => write!(f, "role does not permit this action"),
            Self::Ownership => write!(f, "only the event creator may do this"),
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                |
/// |-----------|---------------------|----------------------------|
/// | 1000–1999 | Validation          | 400 Bad Request            |
/// | 2000–2999 | State/Not Found     | 404 Not Found / 400        |
/// | 3000–3999 | Server              | 500 Internal Server Error  |
/// | 4000–4999 | Authentication/ACL  | 401 / 403                  |
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Request payload failed field validation.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Path parameter could not be parsed as an id.
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// Update payload carried no fields at all.
    #[error("no fields provided for update")]
    EmptyUpdate,

    /// Event with the given id was not found.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// The principal already holds an interest edge for this event.
    ///
    /// A benign duplicate-toggle signal, not a hard failure: the response
    /// body is a plain message rather than the error envelope.
    #[error("interest already registered for this event")]
    AlreadyInterested,

    /// Store/repository layer failure.
    #[error("store error: {0}")]
    Store(String),

    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Authorization header absent or not `Bearer <token>`.
    #[error("token not provided")]
    MissingToken,

    /// Bearer token failed verification.
    #[error("invalid or expired token: {0}")]
    InvalidToken(#[from] TokenError),

    /// Principal is authenticated but not allowed to perform the action.
    #[error("access denied: {0}")]
    Forbidden(ForbiddenReason),
}

impl CatalogError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::InvalidId(_) => 1002,
            Self::EmptyUpdate => 1003,
            Self::EventNotFound(_) => 2001,
            Self::AlreadyInterested => 2002,
            Self::Internal(_) => 3000,
            Self::Store(_) => 3001,
            Self::MissingToken => 4001,
            Self::InvalidToken(_) => 4002,
            Self::Forbidden(ForbiddenReason::Role) => 4003,
            Self::Forbidden(ForbiddenReason::Ownership) => 4004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidId(_)
            | Self::EmptyUpdate
            | Self::AlreadyInterested => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MissingToken | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Duplicate toggles answer with a plain message body, matching the
        // benign-rejection contract of the interest endpoints.
        if matches!(self, Self::AlreadyInterested) {
            let body = serde_json::json!({ "message": self.to_string() });
            let mut response = axum::Json(body).into_response();
            *response.status_mut() = status;
            return response;
        }

        let details = match &self {
            Self::Validation(fields) => serde_json::to_value(fields).ok(),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            CatalogError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::EventNotFound(EventId::new(7)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::MissingToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CatalogError::Forbidden(ForbiddenReason::Role).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            CatalogError::AlreadyInterested.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::Store("down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn role_and_ownership_codes_are_distinct() {
        let role = CatalogError::Forbidden(ForbiddenReason::Role);
        let ownership = CatalogError::Forbidden(ForbiddenReason::Ownership);
        assert_ne!(role.error_code(), ownership.error_code());
        assert_eq!(role.status_code(), ownership.status_code());
    }

    #[test]
    fn duplicate_toggle_uses_plain_message_body() {
        let response = CatalogError::AlreadyInterested.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_envelope_is_schema_capable() {
        // The envelope types are referenced as response bodies in the
        // OpenAPI path annotations, which requires a derivable schema.
        let schema = <ErrorResponse as utoipa::PartialSchema>::schema();
        assert!(serde_json::to_value(schema).is_ok());
        let schema = <ErrorBody as utoipa::PartialSchema>::schema();
        assert!(serde_json::to_value(schema).is_ok());
    }
}
