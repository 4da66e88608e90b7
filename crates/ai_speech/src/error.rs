//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during audio handling and synthesis
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Audio bytes could not be decoded into samples
    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),

    /// FFmpeg transcode to WAV failed
    #[error("Audio conversion failed: {0}")]
    TranscodeFailed(String),

    /// A required external tool is not installed
    #[error("Missing dependency: {0}")]
    DependencyMissing(String),

    /// Reference audio is shorter than the usable minimum
    #[error("Reference audio too short: {duration_secs:.1}s is below the minimum of {min_secs:.0}s")]
    TooShort {
        /// Duration of the provided reference
        duration_secs: f32,
        /// Minimum usable duration
        min_secs: f32,
    },

    /// Synthesis engine has not finished loading
    #[error("Engine not ready: {0}")]
    EngineNotReady(String),

    /// Reference recording disappeared before the engine could read it
    #[error("Reference audio not found: {0}")]
    ReferenceNotFound(String),

    /// Synthesis run failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Resampling, filtering or container io failed
    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failed_error_message() {
        let err = SpeechError::DecodeFailed("corrupt header".to_string());
        assert_eq!(err.to_string(), "Failed to decode audio: corrupt header");
    }

    #[test]
    fn transcode_failed_error_message() {
        let err = SpeechError::TranscodeFailed("exit status 1".to_string());
        assert_eq!(err.to_string(), "Audio conversion failed: exit status 1");
    }

    #[test]
    fn dependency_missing_error_message() {
        let err = SpeechError::DependencyMissing("ffmpeg".to_string());
        assert_eq!(err.to_string(), "Missing dependency: ffmpeg");
    }

    #[test]
    fn too_short_error_message() {
        let err = SpeechError::TooShort {
            duration_secs: 1.25,
            min_secs: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "Reference audio too short: 1.2s is below the minimum of 2s"
        );
    }

    #[test]
    fn engine_not_ready_error_message() {
        let err = SpeechError::EngineNotReady("model still loading".to_string());
        assert_eq!(err.to_string(), "Engine not ready: model still loading");
    }

    #[test]
    fn reference_not_found_error_message() {
        let err = SpeechError::ReferenceNotFound("/tmp/ref.wav".to_string());
        assert_eq!(err.to_string(), "Reference audio not found: /tmp/ref.wav");
    }

    #[test]
    fn synthesis_failed_error_message() {
        let err = SpeechError::SynthesisFailed("invalid text".to_string());
        assert_eq!(err.to_string(), "Synthesis failed: invalid text");
    }

    #[test]
    fn audio_processing_error_message() {
        let err = SpeechError::AudioProcessing("resampler init".to_string());
        assert_eq!(err.to_string(), "Audio processing failed: resampler init");
    }

    #[test]
    fn configuration_error_message() {
        let err = SpeechError::Configuration("empty command".to_string());
        assert_eq!(err.to_string(), "Configuration error: empty command");
    }
}
