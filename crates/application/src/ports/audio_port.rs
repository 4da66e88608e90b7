//! Audio port - Interface for reference-audio decoding and conditioning

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domain::Language;
#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::error::ApplicationError;

/// A decoded mono reference recording
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceAudio {
    /// Mono samples in `[-1.0, 1.0]`
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl ReferenceAudio {
    /// Duration of the recording in seconds
    #[must_use]
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// A request-scoped temporary audio file
///
/// Deleted when dropped, whichever way the request ends. Deletion
/// failures are logged at warn level, never raised.
#[derive(Debug)]
pub struct TempAudio {
    path: PathBuf,
}

impl TempAudio {
    /// Take ownership of an existing file
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Write bytes to a new temporary file under `dir`
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Internal` if the directory or file
    /// cannot be written.
    pub async fn write(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<Self, ApplicationError> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            ApplicationError::Internal(format!("Failed to create temp directory: {e}"))
        })?;

        let path = dir.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ApplicationError::Internal(format!("Failed to write temp file: {e}")))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Wrote temporary audio file");
        Ok(Self { path })
    }

    /// Path of the temporary file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudio {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "Failed to delete temporary audio file");
            }
        }
    }
}

/// Port for reference-audio processing
///
/// Covers everything between an on-disk upload and a conditioned
/// reference file the engine can clone from.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioPort: Send + Sync {
    /// Decode an audio file into a mono buffer at the engine sample rate
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidReference` when no decoder can
    /// make sense of the file.
    async fn decode(&self, path: &Path) -> Result<ReferenceAudio, ApplicationError>;

    /// Condition a decoded reference for voice cloning
    ///
    /// Trims silence, normalizes loudness and bounds the duration using
    /// the language's parameter profile.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidReference` when less than the
    /// minimum usable duration remains.
    fn condition(
        &self,
        audio: ReferenceAudio,
        language: Language,
    ) -> Result<ReferenceAudio, ApplicationError>;

    /// Stage conditioned samples as a temporary WAV file under `dir`
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Internal` if the file cannot be written.
    async fn stage(&self, audio: &ReferenceAudio, dir: &Path)
    -> Result<TempAudio, ApplicationError>;

    /// Stretch the tempo of an audio file in place, keeping pitch
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidReference` or
    /// `ApplicationError::Internal` when the stretch fails.
    async fn adjust_tempo(&self, path: &Path, rate: f32) -> Result<(), ApplicationError>;
}
