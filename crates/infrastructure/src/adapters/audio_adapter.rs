//! Audio adapter - Implements `AudioPort` over the ai_speech pipeline

use std::path::Path;

use ai_speech::{
    AudioBuffer, BridgeConfig, ConditioningOptions, FfmpegTranscoder, FormatBridge, SpeechError,
    condition_reference, wav,
};
use application::error::ApplicationError;
use application::ports::{AudioPort, ReferenceAudio, TempAudio};
use async_trait::async_trait;
use domain::Language;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Adapter for reference-audio processing using the ai_speech crate
pub struct AudioAdapter {
    bridge: FormatBridge,
    transcoder: FfmpegTranscoder,
    options: ConditioningOptions,
}

impl std::fmt::Debug for AudioAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioAdapter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl AudioAdapter {
    /// Create a new audio adapter
    #[must_use]
    pub fn new(config: &BridgeConfig, options: ConditioningOptions) -> Self {
        Self {
            bridge: FormatBridge::with_config(config),
            transcoder: FfmpegTranscoder::with_config(config),
            options,
        }
    }

    /// Map a pipeline error to an application error
    ///
    /// Anything that makes the reference unusable, including a transcode
    /// that cannot run because FFmpeg is absent, is reported back to the
    /// caller with diagnostic text. Only a broken filter chain is ours.
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::DecodeFailed(_)
            | SpeechError::TranscodeFailed(_)
            | SpeechError::DependencyMissing(_)
            | SpeechError::TooShort { .. } => ApplicationError::InvalidReference(err.to_string()),
            SpeechError::Configuration(_) => ApplicationError::Configuration(err.to_string()),
            other => ApplicationError::Internal(other.to_string()),
        }
    }
}

#[async_trait]
impl AudioPort for AudioAdapter {
    #[instrument(skip(self), fields(path = %path.display()))]
    async fn decode(&self, path: &Path) -> Result<ReferenceAudio, ApplicationError> {
        let buffer = self.bridge.decode(path).await.map_err(Self::map_error)?;
        let sample_rate = buffer.sample_rate();
        Ok(ReferenceAudio {
            samples: buffer.into_samples(),
            sample_rate,
        })
    }

    fn condition(
        &self,
        audio: ReferenceAudio,
        language: Language,
    ) -> Result<ReferenceAudio, ApplicationError> {
        let buffer = AudioBuffer::new(audio.samples, audio.sample_rate);
        let conditioned = condition_reference(buffer, language.profile(), self.options)
            .map_err(Self::map_error)?;
        let sample_rate = conditioned.sample_rate();
        Ok(ReferenceAudio {
            samples: conditioned.into_samples(),
            sample_rate,
        })
    }

    async fn stage(
        &self,
        audio: &ReferenceAudio,
        dir: &Path,
    ) -> Result<TempAudio, ApplicationError> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            ApplicationError::Internal(format!("Failed to create staging directory: {e}"))
        })?;

        let path = dir.join(format!("reference_{}.wav", Uuid::new_v4().simple()));
        let buffer = AudioBuffer::new(audio.samples.clone(), audio.sample_rate);
        wav::write_wav(&path, &buffer).map_err(Self::map_error)?;

        debug!(path = %path.display(), "Staged conditioned reference");
        Ok(TempAudio::new(path))
    }

    #[instrument(skip(self), fields(path = %path.display(), rate))]
    async fn adjust_tempo(&self, path: &Path, rate: f32) -> Result<(), ApplicationError> {
        let stretched = path.with_extension("tempo.wav");
        self.transcoder
            .stretch_tempo(path, &stretched, rate)
            .await
            .map_err(Self::map_error)?;

        tokio::fs::rename(&stretched, path).await.map_err(|e| {
            ApplicationError::Internal(format!("Failed to replace output with stretched audio: {e}"))
        })
    }
}
