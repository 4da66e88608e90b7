//! Types for audio handling and synthesis
//!
//! Contains the sample buffer used by the conditioning pipeline, the
//! container formats accepted for reference uploads, and the request and
//! outcome types for engine synthesis runs.

use std::path::PathBuf;

use domain::LanguageProfile;
use serde::{Deserialize, Serialize};

/// Sample rate every reference recording is converted to before it reaches
/// the engine
pub const TARGET_SAMPLE_RATE: u32 = 22_050;

/// Audio container formats accepted for reference uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    /// WAV format (uncompressed)
    Wav,
    /// MP3 format
    Mp3,
    /// FLAC format (lossless)
    Flac,
    /// M4A/AAC format
    M4a,
    /// OGG container
    Ogg,
}

impl ContainerFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::M4a => "m4a",
            Self::Ogg => "ogg",
        }
    }

    /// Get the MIME type for this format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Flac => "audio/flac",
            Self::M4a => "audio/m4a",
            Self::Ogg => "audio/ogg",
        }
    }

    /// Parse a format from a file extension (case-insensitive)
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "m4a" => Some(Self::M4a),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    /// Parse a format from a file path's extension
    #[must_use]
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Mono audio samples with their sample rate
///
/// All pipeline stages operate on this buffer. Samples are `f32` in the
/// nominal range `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer from raw mono samples
    #[must_use]
    pub const fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Get the samples
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume and return the samples
    #[must_use]
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Get the sample rate in Hz
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples in the buffer
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the buffer holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the buffer in seconds
    #[must_use]
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Largest absolute sample value
    #[must_use]
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |max, s| max.max(s.abs()))
    }

    /// Root mean square level of the buffer
    #[must_use]
    pub fn rms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_of_squares: f64 = self
            .samples
            .iter()
            .map(|&s| f64::from(s) * f64::from(s))
            .sum();
        (sum_of_squares / self.samples.len() as f64).sqrt() as f32
    }
}

/// Input for a single engine synthesis run
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Text to speak
    pub text: String,
    /// ISO 639-1 code of the language to speak in
    pub language: String,
    /// Conditioned reference recording the engine clones from
    pub reference_path: PathBuf,
    /// Where the engine must write its WAV output
    pub output_path: PathBuf,
    /// Language-specific sampling parameters
    pub profile: LanguageProfile,
}

/// Result of a completed synthesis run
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    /// Path of the WAV file the engine wrote
    pub output_path: PathBuf,
    /// Duration of the synthesized audio in seconds
    pub duration_secs: f32,
    /// Sample rate of the synthesized audio in Hz
    pub sample_rate: u32,
}
