//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of the Social service.
///
/// Domain errors (validation, not found) are recoverable and reported to the
/// caller as-is. Infrastructure errors are not handled by the service layer;
/// they propagate up to the transport boundary, which turns them into a
/// generic fault response.
#[derive(Error, Debug)]
pub enum SocialError {
    // ============ Domain Errors ============
    /// One or more payload fields failed their declared constraints.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        violations: Vec<FieldError>,
    },

    /// The request could not be interpreted (malformed body, bad path id).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request body exceeds the configured size limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SocialError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } | Self::InvalidRequest(_) => 400,
            Self::NotFound { .. } => 404,
            Self::PayloadTooLarge(_) => 413,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for failures the caller cannot fix by changing the request.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error from a list of field violations.
    ///
    /// The summary message joins every violation as `field: message`.
    #[must_use]
    pub fn validation(violations: Vec<FieldError>) -> Self {
        let message = violations
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");

        Self::Validation {
            message,
            violations,
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request<T: Into<String>>(message: T) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the field violations carried by a validation error.
    #[must_use]
    pub fn violations(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for SocialError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-level violations, present only for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// A single field-level constraint failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Constraint message
    pub message: String,
    /// Constraint code
    pub code: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

impl ErrorResponse {
    /// Creates a new error response from a `SocialError`.
    ///
    /// Validation errors carry their violations along.
    #[must_use]
    pub fn from_error(error: &SocialError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            errors: error.violations().map(<[FieldError]>::to_vec),
        }
    }

    /// Creates an error response with an explicit code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            errors: None,
        }
    }
}

impl From<&SocialError> for ErrorResponse {
    fn from(error: &SocialError) -> Self {
        Self::from_error(error)
    }
}
