//! FFmpeg subprocess transcoding
//!
//! Fallback path for reference uploads the native WAV reader cannot handle,
//! plus the optional tempo stretch applied to synthesized output.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::config::BridgeConfig;
use crate::error::SpeechError;
use crate::types::TARGET_SAMPLE_RATE;

/// How much of FFmpeg's stderr is carried into error messages
const STDERR_SNIPPET_CHARS: usize = 200;

/// Valid range for the `atempo` filter
const TEMPO_RANGE: std::ops::RangeInclusive<f32> = 0.5..=2.0;

/// Audio transcoder that shells out to FFmpeg
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: Option<String>,
    sample_rate: u32,
    timeout: Duration,
}

impl FfmpegTranscoder {
    /// Create a transcoder that expects `ffmpeg` in PATH
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ffmpeg_path: None,
            sample_rate: TARGET_SAMPLE_RATE,
            timeout: Duration::from_secs(30),
        }
    }

    /// Create a transcoder from bridge configuration
    #[must_use]
    pub fn with_config(config: &BridgeConfig) -> Self {
        Self {
            ffmpeg_path: Some(config.ffmpeg_path.clone()),
            sample_rate: config.target_sample_rate,
            timeout: Duration::from_secs(config.transcode_timeout_secs),
        }
    }

    /// Get the FFmpeg command to use
    fn ffmpeg_command(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Check if FFmpeg is available on the system
    pub async fn is_available(&self) -> bool {
        Command::new(self.ffmpeg_command())
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Transcode any FFmpeg-readable input into mono 16-bit PCM WAV at the
    /// configured sample rate
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::DependencyMissing` if FFmpeg is not installed
    /// and `SpeechError::TranscodeFailed` if the conversion fails, times
    /// out, or produces no output.
    pub async fn to_wav(&self, input: &Path, output: &Path) -> Result<(), SpeechError> {
        let mut command = Command::new(self.ffmpeg_command());
        command
            .arg("-i")
            .arg(input)
            .arg("-acodec")
            .arg("pcm_s16le")
            .arg("-ar")
            .arg(self.sample_rate.to_string())
            .arg("-ac")
            .arg("1")
            .arg("-y")
            .arg(output);

        self.execute(command).await?;
        Self::ensure_output(output).await
    }

    /// Stretch the tempo of an audio file without changing its pitch
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if `rate` is outside the range
    /// the `atempo` filter accepts, otherwise the same errors as `to_wav`.
    pub async fn stretch_tempo(
        &self,
        input: &Path,
        output: &Path,
        rate: f32,
    ) -> Result<(), SpeechError> {
        if !TEMPO_RANGE.contains(&rate) {
            return Err(SpeechError::Configuration(format!(
                "Tempo rate must be between 0.5 and 2.0, got {rate}"
            )));
        }

        let mut command = Command::new(self.ffmpeg_command());
        command
            .arg("-i")
            .arg(input)
            .arg("-filter:a")
            .arg(format!("atempo={rate}"))
            .arg("-y")
            .arg(output);

        self.execute(command).await?;
        Self::ensure_output(output).await
    }

    /// Spawn FFmpeg and wait for it within the configured timeout
    async fn execute(&self, mut command: Command) -> Result<(), SpeechError> {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running ffmpeg: {:?}", command);

        let child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::DependencyMissing(format!(
                    "ffmpeg not found at '{}'. Install FFmpeg to enable audio conversion.",
                    self.ffmpeg_command()
                ))
            } else {
                SpeechError::TranscodeFailed(format!("Failed to run ffmpeg: {e}"))
            }
        })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                SpeechError::TranscodeFailed(format!("Failed to wait for ffmpeg: {e}"))
            })?,
            Err(_) => {
                warn!("ffmpeg timed out after {:?}", self.timeout);
                return Err(SpeechError::TranscodeFailed(format!(
                    "ffmpeg timed out after {}s",
                    self.timeout.as_secs()
                )));
            },
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffmpeg failed: {}", stderr);
            return Err(SpeechError::TranscodeFailed(truncate_stderr(&stderr)));
        }

        Ok(())
    }

    /// Reject runs that exit zero without writing a usable file
    async fn ensure_output(output: &Path) -> Result<(), SpeechError> {
        let metadata = tokio::fs::metadata(output)
            .await
            .map_err(|e| SpeechError::TranscodeFailed(format!("ffmpeg produced no output: {e}")))?;

        if metadata.len() == 0 {
            return Err(SpeechError::TranscodeFailed(
                "ffmpeg produced empty output".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_stderr(stderr: &str) -> String {
    stderr.trim().chars().take(STDERR_SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable_transcoder() -> FfmpegTranscoder {
        FfmpegTranscoder::with_config(&BridgeConfig {
            ffmpeg_path: "/nonexistent/ffmpeg".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn default_transcoder_uses_path_lookup() {
        let transcoder = FfmpegTranscoder::new();
        assert_eq!(transcoder.ffmpeg_command(), "ffmpeg");
    }

    #[test]
    fn config_overrides_command_and_timeout() {
        let transcoder = FfmpegTranscoder::with_config(&BridgeConfig {
            ffmpeg_path: "/opt/ffmpeg/bin/ffmpeg".to_string(),
            transcode_timeout_secs: 60,
            target_sample_rate: 16_000,
        });

        assert_eq!(transcoder.ffmpeg_command(), "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(transcoder.timeout, Duration::from_secs(60));
        assert_eq!(transcoder.sample_rate, 16_000);
    }

    #[test]
    fn truncates_long_stderr() {
        let long = "e".repeat(500);
        let truncated = truncate_stderr(&long);
        assert_eq!(truncated.chars().count(), STDERR_SNIPPET_CHARS);
    }

    #[test]
    fn truncation_trims_and_respects_char_boundaries() {
        let stderr = format!("  {}  ", "ü".repeat(300));
        let truncated = truncate_stderr(&stderr);
        assert_eq!(truncated.chars().count(), STDERR_SNIPPET_CHARS);
        assert!(truncated.chars().all(|c| c == 'ü'));
    }

    #[test]
    fn short_stderr_passes_through() {
        assert_eq!(truncate_stderr(" codec error \n"), "codec error");
    }

    #[tokio::test]
    async fn is_available_returns_false_when_not_installed() {
        assert!(!unavailable_transcoder().is_available().await);
    }

    #[tokio::test]
    async fn missing_binary_is_a_dependency_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.mp3");
        let output = dir.path().join("output.wav");
        std::fs::write(&input, b"fake").unwrap();

        let result = unavailable_transcoder().to_wav(&input, &output).await;

        assert!(matches!(result, Err(SpeechError::DependencyMissing(_))));
    }

    #[tokio::test]
    async fn tempo_outside_filter_range_is_rejected() {
        let result = unavailable_transcoder()
            .stretch_tempo(Path::new("in.wav"), Path::new("out.wav"), 3.0)
            .await;

        assert!(matches!(result, Err(SpeechError::Configuration(_))));
    }

    #[tokio::test]
    async fn tempo_within_range_reaches_spawn() {
        // With an unavailable binary the rate check passes and the spawn
        // fails, proving validation ordering
        let result = unavailable_transcoder()
            .stretch_tempo(Path::new("in.wav"), Path::new("out.wav"), 0.85)
            .await;

        assert!(matches!(result, Err(SpeechError::DependencyMissing(_))));
    }
}
