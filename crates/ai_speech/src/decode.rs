//! Upload decoding
//!
//! Turns a staged reference file into an engine-ready sample buffer. WAV
//! input is read natively; everything else, including WAV files the native
//! reader rejects, gets exactly one FFmpeg transcode attempt.

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::error::SpeechError;
use crate::transcode::FfmpegTranscoder;
use crate::types::{AudioBuffer, ContainerFormat};
use crate::{resample, wav};

/// Decodes reference uploads into mono buffers at the engine sample rate
#[derive(Debug, Clone)]
pub struct FormatBridge {
    transcoder: FfmpegTranscoder,
    target_sample_rate: u32,
}

impl FormatBridge {
    /// Create a bridge with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&BridgeConfig::default())
    }

    /// Create a bridge from configuration
    #[must_use]
    pub fn with_config(config: &BridgeConfig) -> Self {
        Self {
            transcoder: FfmpegTranscoder::with_config(config),
            target_sample_rate: config.target_sample_rate,
        }
    }

    /// Check whether the fallback transcoder is usable
    pub async fn transcoder_available(&self) -> bool {
        self.transcoder.is_available().await
    }

    /// Decode an audio file into a mono buffer at the target sample rate
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::DependencyMissing` when the fallback is needed
    /// but FFmpeg is not installed, `SpeechError::TranscodeFailed` when the
    /// fallback run fails, and `SpeechError::DecodeFailed` when no decoder
    /// can make sense of the data.
    pub async fn decode(&self, path: &Path) -> Result<AudioBuffer, SpeechError> {
        if ContainerFormat::from_path(path) == Some(ContainerFormat::Wav) {
            match wav::read_wav(path) {
                Ok(buffer) => {
                    debug!(
                        sample_rate = buffer.sample_rate(),
                        samples = buffer.len(),
                        "Decoded WAV natively"
                    );
                    return resample::resample(buffer, self.target_sample_rate);
                },
                Err(err) => {
                    warn!("Native WAV decode failed, falling back to ffmpeg: {err}");
                },
            }
        }

        self.decode_via_ffmpeg(path).await
    }

    /// Single-attempt FFmpeg fallback through a temporary WAV file
    async fn decode_via_ffmpeg(&self, path: &Path) -> Result<AudioBuffer, SpeechError> {
        let staging = NamedTempFile::with_suffix(".wav")
            .map_err(|e| SpeechError::TranscodeFailed(format!("Failed to create temp file: {e}")))?;

        self.transcoder.to_wav(path, staging.path()).await?;

        let buffer = wav::read_wav(staging.path())?;
        debug!(
            sample_rate = buffer.sample_rate(),
            samples = buffer.len(),
            "Decoded via ffmpeg fallback"
        );
        resample::resample(buffer, self.target_sample_rate)
    }
}

impl Default for FormatBridge {
    fn default() -> Self {
        Self::new()
    }
}
