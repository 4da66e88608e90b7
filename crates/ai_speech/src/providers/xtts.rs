//! XTTS voice-cloning engine provider
//!
//! Implements `SpeechSynthesizer` over an XTTS-style CLI runner.
//!
//! # Prerequisites
//!
//! - The engine binary must be installed and available in PATH (or
//!   configured with an absolute path)
//! - The configured model is fetched and cached by the binary on first
//!   warm-up
//!
//! # CLI contract
//!
//! The runner reads the text to speak from stdin and takes everything else
//! as flags:
//!
//! ```text
//! xtts --model <id> --speaker-wav <ref.wav> --language <code> \
//!      --output <out.wav> --temperature <t> --top-p <p> --top-k <k> \
//!      [--no-split]
//! xtts --model <id> --warm-up
//! ```
//!
//! `--warm-up` loads (downloading if necessary) the model and exits, which
//! is what backs the lazy once-only readiness guard.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use domain::LanguageProfile;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, instrument, warn};

use crate::config::EngineConfig;
use crate::error::SpeechError;
use crate::ports::SpeechSynthesizer;
use crate::types::{SynthesisOutcome, SynthesisRequest};
use crate::wav;

/// Voice-cloning engine backed by an XTTS CLI runner
#[derive(Debug)]
pub struct XttsEngine {
    config: EngineConfig,
    ready: OnceCell<()>,
}

impl XttsEngine {
    /// Create a new engine provider
    ///
    /// The model is not loaded here; the first warm-up or synthesis call
    /// triggers the load.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is
    /// invalid.
    pub fn new(config: EngineConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        Ok(Self {
            config,
            ready: OnceCell::new(),
        })
    }

    fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.config.synthesis_timeout_secs)
    }

    /// Block until the model is loaded, loading it if necessary
    ///
    /// Concurrent callers coalesce on one probe; a failed probe leaves
    /// the cell empty so the next caller retries.
    async fn ensure_ready(&self) -> Result<(), SpeechError> {
        self.ready.get_or_try_init(|| self.probe()).await?;
        Ok(())
    }

    /// Run the engine in warm-up mode to load the model
    async fn probe(&self) -> Result<(), SpeechError> {
        info!(model = %self.config.model, "Loading synthesis model");

        let mut command = Command::new(&self.config.command);
        command
            .arg("--model")
            .arg(&self.config.model)
            .arg("--warm-up")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::EngineNotReady(format!(
                    "engine command '{}' not found",
                    self.config.command
                ))
            } else {
                SpeechError::EngineNotReady(format!("failed to start engine: {e}"))
            }
        })?;

        let output = match tokio::time::timeout(self.run_timeout(), child.wait_with_output()).await
        {
            Ok(result) => result.map_err(|e| {
                SpeechError::EngineNotReady(format!("failed to wait for engine: {e}"))
            })?,
            Err(_) => {
                return Err(SpeechError::EngineNotReady(format!(
                    "model load timed out after {}s",
                    self.config.synthesis_timeout_secs
                )));
            },
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Model load failed: {}", stderr);
            return Err(SpeechError::EngineNotReady(format!(
                "model load failed: {}",
                stderr.trim()
            )));
        }

        info!(model = %self.config.model, "Synthesis model loaded");
        Ok(())
    }

    /// Sampling flags derived from a language profile
    fn profile_args(profile: &LanguageProfile) -> Vec<String> {
        let mut args = vec![
            "--temperature".to_string(),
            profile.temperature.to_string(),
            "--top-p".to_string(),
            profile.top_p.to_string(),
            "--top-k".to_string(),
            profile.top_k.to_string(),
        ];

        if !profile.split_sentences {
            args.push("--no-split".to_string());
        }

        args
    }
}

#[async_trait]
impl SpeechSynthesizer for XttsEngine {
    fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    async fn warm_up(&self) -> Result<(), SpeechError> {
        self.ensure_ready().await
    }

    #[instrument(skip(self, request), fields(language = %request.language, text_len = request.text.len()))]
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisOutcome, SpeechError> {
        self.ensure_ready().await?;

        if !request.reference_path.exists() {
            return Err(SpeechError::ReferenceNotFound(
                request.reference_path.display().to_string(),
            ));
        }

        let mut cmd = Command::new(&self.config.command);
        cmd.arg("--model")
            .arg(&self.config.model)
            .arg("--speaker-wav")
            .arg(&request.reference_path)
            .arg("--language")
            .arg(&request.language)
            .arg("--output")
            .arg(&request.output_path)
            .args(Self::profile_args(&request.profile))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running synthesis engine: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::EngineNotReady(format!(
                    "engine command '{}' not found",
                    self.config.command
                ))
            } else {
                SpeechError::SynthesisFailed(format!("failed to run engine: {e}"))
            }
        })?;

        // Write the text to stdin
        if let Some(mut stdin) = child.stdin.take() {
            use tokio::io::AsyncWriteExt;
            stdin.write_all(request.text.as_bytes()).await.map_err(|e| {
                SpeechError::SynthesisFailed(format!("failed to write to engine stdin: {e}"))
            })?;
            // stdin is dropped here, closing it
        }

        let output = match tokio::time::timeout(self.run_timeout(), child.wait_with_output()).await
        {
            Ok(result) => result.map_err(|e| {
                SpeechError::SynthesisFailed(format!("failed to wait for engine: {e}"))
            })?,
            Err(_) => {
                warn!(
                    "Synthesis timed out after {}s",
                    self.config.synthesis_timeout_secs
                );
                return Err(SpeechError::SynthesisFailed(format!(
                    "engine timed out after {}s",
                    self.config.synthesis_timeout_secs
                )));
            },
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Engine failed: {}", stderr);
            return Err(SpeechError::SynthesisFailed(format!(
                "engine exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        // Reload from disk so the outcome reflects exactly what was
        // persisted
        let buffer = wav::read_wav(&request.output_path).map_err(|e| {
            SpeechError::SynthesisFailed(format!("engine produced unreadable output: {e}"))
        })?;

        if buffer.is_empty() {
            warn!("Engine produced empty output");
            return Err(SpeechError::SynthesisFailed(
                "engine produced empty output".to_string(),
            ));
        }

        debug!(
            duration_secs = buffer.duration_secs(),
            sample_rate = buffer.sample_rate(),
            "Synthesis complete"
        );

        Ok(SynthesisOutcome {
            output_path: request.output_path,
            duration_secs: buffer.duration_secs(),
            sample_rate: buffer.sample_rate(),
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
