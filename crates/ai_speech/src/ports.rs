//! Port definitions for synthesis engines
//!
//! Defines the trait a voice-cloning engine implementation must satisfy.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{SynthesisOutcome, SynthesisRequest};

/// Port for voice-cloning synthesis engines
///
/// Implementations turn text plus a conditioned reference recording into a
/// WAV file in that reference's voice.
///
/// # Example
///
/// ```ignore
/// use ai_speech::{SpeechSynthesizer, SynthesisRequest};
///
/// async fn speak(
///     engine: &impl SpeechSynthesizer,
///     request: SynthesisRequest,
/// ) -> Result<std::path::PathBuf, SpeechError> {
///     let outcome = engine.synthesize(request).await?;
///     Ok(outcome.output_path)
/// }
/// ```
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Check whether the engine model has finished loading
    ///
    /// # Returns
    ///
    /// Returns `true` once a warm-up has completed successfully.
    fn is_ready(&self) -> bool;

    /// Load the engine model if it is not loaded yet
    ///
    /// Concurrent callers share a single load; a failed load is not
    /// cached, so the next call tries again.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the engine binary is missing or the model
    /// cannot be loaded.
    async fn warm_up(&self) -> Result<(), SpeechError>;

    /// Synthesize speech in the reference recording's voice
    ///
    /// # Arguments
    ///
    /// * `request` - Text, language, reference path, output path and
    ///   sampling parameters for the run
    ///
    /// # Returns
    ///
    /// Returns a `SynthesisOutcome` describing the WAV file written to the
    /// request's output path.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the reference is missing, the engine fails,
    /// or the output cannot be read back.
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisOutcome, SpeechError>;

    /// Get the identifier of the loaded model
    fn model_name(&self) -> &str;
}
