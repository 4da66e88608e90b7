//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reference audio could not be turned into a usable voice sample
    #[error("Invalid reference audio: {0}")]
    InvalidReference(String),

    /// A requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Synthesis engine has not finished loading
    #[error("Engine not ready: {0}")]
    EngineNotReady(String),

    /// The engine run itself failed
    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check whether the error is the caller's to fix
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::InvalidReference(_) | Self::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_passes_through_its_message() {
        let err = ApplicationError::from(DomainError::EmptyText);
        assert_eq!(err.to_string(), "Text cannot be empty");
    }

    #[test]
    fn invalid_reference_error_message() {
        let err = ApplicationError::InvalidReference("corrupt header".to_string());
        assert_eq!(err.to_string(), "Invalid reference audio: corrupt header");
    }

    #[test]
    fn not_found_error_message() {
        let err = ApplicationError::NotFound("morgan_freeman.wav".to_string());
        assert_eq!(err.to_string(), "Not found: morgan_freeman.wav");
    }

    #[test]
    fn engine_not_ready_error_message() {
        let err = ApplicationError::EngineNotReady("model is still loading".to_string());
        assert_eq!(err.to_string(), "Engine not ready: model is still loading");
    }

    #[test]
    fn synthesis_error_message() {
        let err = ApplicationError::Synthesis("engine exited with status 1".to_string());
        assert_eq!(err.to_string(), "Synthesis failed: engine exited with status 1");
    }

    #[test]
    fn user_errors_are_classified() {
        assert!(ApplicationError::from(DomainError::EmptyText).is_user_error());
        assert!(ApplicationError::InvalidReference("x".to_string()).is_user_error());
        assert!(ApplicationError::NotFound("x".to_string()).is_user_error());
        assert!(!ApplicationError::EngineNotReady("x".to_string()).is_user_error());
        assert!(!ApplicationError::Internal("x".to_string()).is_user_error());
    }
}
