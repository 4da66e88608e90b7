//! Engine adapter - Implements `EnginePort` over the XTTS CLI engine

use ai_speech::{EngineConfig, SpeechError, SpeechSynthesizer, SynthesisRequest, XttsEngine};
use application::error::ApplicationError;
use application::ports::{EngineOutput, EnginePort, EngineRequest};
use async_trait::async_trait;

/// Adapter for the voice-cloning engine using the ai_speech crate
#[derive(Debug)]
pub struct EngineAdapter {
    engine: XttsEngine,
}

impl EngineAdapter {
    /// Create a new engine adapter
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the engine
    /// configuration is invalid.
    pub fn new(config: EngineConfig) -> Result<Self, ApplicationError> {
        let engine = XttsEngine::new(config)
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { engine })
    }

    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::EngineNotReady(e) => ApplicationError::EngineNotReady(e),
            SpeechError::SynthesisFailed(e) => ApplicationError::Synthesis(e),
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            other => ApplicationError::Internal(other.to_string()),
        }
    }
}

#[async_trait]
impl EnginePort for EngineAdapter {
    fn is_ready(&self) -> bool {
        self.engine.is_ready()
    }

    async fn warm_up(&self) -> Result<(), ApplicationError> {
        self.engine.warm_up().await.map_err(Self::map_error)
    }

    async fn synthesize(&self, request: EngineRequest) -> Result<EngineOutput, ApplicationError> {
        let outcome = self
            .engine
            .synthesize(SynthesisRequest {
                text: request.text,
                language: request.language.code().to_string(),
                reference_path: request.reference_path,
                output_path: request.output_path,
                profile: *request.language.profile(),
            })
            .await
            .map_err(Self::map_error)?;

        Ok(EngineOutput {
            output_path: outcome.output_path,
            duration_secs: outcome.duration_secs,
            sample_rate: outcome.sample_rate,
        })
    }

    fn model_name(&self) -> String {
        self.engine.model_name().to_string()
    }
}
