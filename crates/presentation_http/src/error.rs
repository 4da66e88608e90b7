//! API error handling
//!
//! Maps application errors to HTTP responses. Internal failures are
//! logged in full server-side and answered with a generic message;
//! client-caused errors carry their reason, truncated to a safe length.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Longest error message a client ever sees
const MAX_CLIENT_MESSAGE_CHARS: usize = 200;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

/// Truncate a message to the client-facing limit
fn truncate_message(msg: &str) -> String {
    if msg.chars().count() <= MAX_CLIENT_MESSAGE_CHARS {
        return msg.to_string();
    }
    msg.chars().take(MAX_CLIENT_MESSAGE_CHARS).collect()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", truncate_message(msg)),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", truncate_message(msg)),
            Self::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                truncate_message(msg),
            ),
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidReference(msg) => {
                Self::BadRequest(format!("Invalid reference audio: {msg}"))
            }
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::EngineNotReady(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Synthesis(msg)
            | ApplicationError::Configuration(msg)
            | ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;

    use super::*;

    #[test]
    fn api_error_bad_request_message() {
        let err = ApiError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn api_error_not_found_message() {
        let err = ApiError::NotFound("resource".to_string());
        assert_eq!(err.to_string(), "Not found: resource");
    }

    #[test]
    fn api_error_service_unavailable_message() {
        let err = ApiError::ServiceUnavailable("engine loading".to_string());
        assert_eq!(err.to_string(), "Service unavailable: engine loading");
    }

    #[test]
    fn error_response_serialization() {
        let resp = ErrorResponse {
            error: "Bad request".to_string(),
            code: "bad_request".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("code"));
    }

    #[test]
    fn domain_error_converts_to_bad_request() {
        let source = ApplicationError::from(DomainError::EmptyText);
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::BadRequest(_)));
    }

    #[test]
    fn invalid_reference_converts_to_bad_request() {
        let source = ApplicationError::InvalidReference("corrupt header".to_string());
        let result: ApiError = source.into();
        let ApiError::BadRequest(msg) = result else {
            unreachable!("Expected BadRequest");
        };
        assert!(msg.contains("corrupt header"));
    }

    #[test]
    fn not_found_converts() {
        let source = ApplicationError::NotFound("sample".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::NotFound(_)));
    }

    #[test]
    fn engine_not_ready_converts_to_service_unavailable() {
        let source = ApplicationError::EngineNotReady("model loading".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn synthesis_failure_converts_to_internal() {
        let source = ApplicationError::Synthesis("engine exited with status 1".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::Internal(_)));
    }

    #[test]
    fn configuration_error_converts_to_internal() {
        let source = ApplicationError::Configuration("bad config".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::Internal(_)));
    }

    #[test]
    fn into_response_bad_request() {
        let response = ApiError::BadRequest("invalid".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn into_response_not_found() {
        let response = ApiError::NotFound("resource".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn into_response_service_unavailable() {
        let response = ApiError::ServiceUnavailable("down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn into_response_internal() {
        let response = ApiError::Internal("crash".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn long_messages_are_truncated() {
        let long = "x".repeat(500);
        let truncated = truncate_message(&long);
        assert_eq!(truncated.chars().count(), 200);
    }

    #[test]
    fn short_messages_pass_unchanged() {
        assert_eq!(truncate_message("short"), "short");
    }
}
