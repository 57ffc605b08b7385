//! Unified error types for all layers of the service.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the ReqRes user listing service.
///
/// Most of these never reach a caller of the listing operation: transport,
/// decode and cache failures are recovered where they happen. They exist so
/// that collaborators can report what went wrong and the recovery site can
/// log it.
#[derive(Error, Debug)]
pub enum ReqResError {
    // ============ Request Errors ============
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// External service error
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Payload could not be decoded or encoded
    #[error("Decode error: {0}")]
    Decode(String),

    // ============ Extension Errors ============
    /// A registered pipeline observer failed
    #[error("Observer error: {observer} - {message}")]
    Observer { observer: String, message: String },

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReqResError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Timeout(_) => 503,
            Self::ExternalService { .. } => 502,
            Self::Configuration(_)
            | Self::Cache(_)
            | Self::Decode(_)
            | Self::Observer { .. }
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Observer { .. } => "OBSERVER_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates an external service error.
    #[must_use]
    pub fn external<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates an observer failure.
    #[must_use]
    pub fn observer<S: Into<String>, M: Into<String>>(observer: S, message: M) -> Self {
        Self::Observer {
            observer: observer.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::ExternalService { .. } | Self::Cache(_) | Self::Timeout(_)
        )
    }
}

impl From<serde_json::Error> for ReqResError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON error: {}", err))
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
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `ReqResError`.
    #[must_use]
    pub fn from_error(error: &ReqResError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&ReqResError> for ErrorResponse {
    fn from(error: &ReqResError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ReqResError::validation("page must be >= 1").status_code(), 400);
        assert_eq!(ReqResError::not_found("User", 7).status_code(), 404);
        assert_eq!(ReqResError::external("reqres", "refused").status_code(), 502);
        assert_eq!(ReqResError::Timeout("10s".to_string()).status_code(), 503);
        assert_eq!(ReqResError::observer("limit_users", "boom").status_code(), 500);
        assert_eq!(ReqResError::Cache("down".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ReqResError::validation("bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(ReqResError::observer("a", "b").error_code(), "OBSERVER_ERROR");
        assert_eq!(ReqResError::Decode("x".to_string()).error_code(), "DECODE_ERROR");
        assert_eq!(ReqResError::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(ReqResError::external("reqres", "reset").is_retriable());
        assert!(ReqResError::Timeout("slow".to_string()).is_retriable());
        assert!(ReqResError::Cache("gone".to_string()).is_retriable());
        assert!(!ReqResError::observer("a", "b").is_retriable());
        assert!(!ReqResError::validation("bad").is_retriable());
    }

    #[test]
    fn test_observer_error_display() {
        let err = ReqResError::observer("filter_by_email", "bad domain list");
        let text = err.to_string();
        assert!(text.contains("filter_by_email"));
        assert!(text.contains("bad domain list"));
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ReqResError = json_err.into();
        assert!(matches!(err, ReqResError::Decode(_)));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = ReqResError::observer("limit_users", "boom");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "OBSERVER_ERROR");
        assert!(response.message.contains("boom"));
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = ReqResError::validation("bad input");
        let details = vec![FieldError {
            field: "page".to_string(),
            message: "must be at least 1".to_string(),
            code: "range".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
