//! Engine port - Interface for the voice-cloning synthesis engine

use std::path::PathBuf;

use async_trait::async_trait;
use domain::Language;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Input for a single synthesis run
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// Text to speak
    pub text: String,
    /// Language to speak in
    pub language: Language,
    /// Conditioned reference recording the engine clones from
    pub reference_path: PathBuf,
    /// Where the engine must write its WAV output
    pub output_path: PathBuf,
}

/// Result of a completed synthesis run
#[derive(Debug, Clone)]
pub struct EngineOutput {
    /// Path of the WAV file the engine wrote
    pub output_path: PathBuf,
    /// Duration of the synthesized audio in seconds
    pub duration_secs: f32,
    /// Sample rate of the synthesized audio in Hz
    pub sample_rate: u32,
}

/// Port for the synthesis engine
///
/// One implementation instance is shared read-only across requests;
/// model loading happens at most once behind the implementation's own
/// guard.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EnginePort: Send + Sync {
    /// Check whether the engine model has finished loading
    fn is_ready(&self) -> bool;

    /// Load the engine model if it is not loaded yet
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::EngineNotReady` when the model cannot
    /// be loaded.
    async fn warm_up(&self) -> Result<(), ApplicationError>;

    /// Synthesize speech in the reference recording's voice
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::EngineNotReady` before the model has
    /// loaded and `ApplicationError::Synthesis` when the run fails.
    async fn synthesize(&self, request: EngineRequest) -> Result<EngineOutput, ApplicationError>;

    /// Get the identifier of the loaded model
    fn model_name(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_engine_synthesizes_to_requested_path() {
        let mut mock = MockEnginePort::new();
        mock.expect_synthesize().returning(|request| {
            Ok(EngineOutput {
                output_path: request.output_path,
                duration_secs: 1.5,
                sample_rate: 22_050,
            })
        });

        let output = mock
            .synthesize(EngineRequest {
                text: "Hello".to_string(),
                language: Language::En,
                reference_path: PathBuf::from("/tmp/ref.wav"),
                output_path: PathBuf::from("/tmp/out.wav"),
            })
            .await
            .unwrap();

        assert_eq!(output.output_path, PathBuf::from("/tmp/out.wav"));
        assert!(output.duration_secs > 0.0);
    }

    #[test]
    fn mock_engine_readiness() {
        let mut mock = MockEnginePort::new();
        mock.expect_is_ready().returning(|| false);
        assert!(!mock.is_ready());
    }

    #[test]
    fn engine_request_has_debug() {
        let request = EngineRequest {
            text: "Test".to_string(),
            language: Language::De,
            reference_path: PathBuf::from("/tmp/ref.wav"),
            output_path: PathBuf::from("/tmp/out.wav"),
        };
        let debug = format!("{request:?}");
        assert!(debug.contains("EngineRequest"));
        assert!(debug.contains("De"));
    }
}
