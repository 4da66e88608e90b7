//! Synthesis service - Drives the voice-cloning request pipeline
//!
//! One request walks through: validate → resolve reference → decode →
//! condition → stage → synthesize → read back. Temporary files are
//! RAII-guarded so they disappear when the request ends, success or
//! failure. Batch requests share one conditioned reference and isolate
//! per-item failures.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use domain::{DomainError, Language, SynthesisText, VoiceCatalog, split_batch_texts, upload_extension};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApplicationError,
    ports::{AudioPort, EnginePort, EngineRequest, ReferenceAudio, TempAudio},
};

/// Directory layout and pipeline switches for the service
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Directory holding the preset voice samples
    pub samples_dir: PathBuf,
    /// Directory synthesized output is written to
    pub output_dir: PathBuf,
    /// Directory for request-scoped temporary files
    pub temp_dir: PathBuf,
    /// Stretch synthesized output to the profile's speech rate
    pub apply_speech_rate: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            samples_dir: PathBuf::from("samples"),
            output_dir: PathBuf::from("output"),
            temp_dir: std::env::temp_dir(),
            apply_speech_rate: false,
        }
    }
}

/// An uploaded reference recording, still as raw container bytes
#[derive(Debug, Clone)]
pub struct UploadedReference {
    /// Client-supplied file name, used for the extension whitelist
    pub filename: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

/// Input for a single synthesis request
#[derive(Debug, Clone)]
pub struct SynthesizeCommand {
    /// Text to speak
    pub text: String,
    /// Requested language code
    pub language: String,
    /// Uploaded reference audio, if any
    pub upload: Option<UploadedReference>,
    /// Preset sample filename, if any
    pub sample: Option<String>,
}

/// Input for a batch synthesis request
#[derive(Debug, Clone)]
pub struct BatchCommand {
    /// Newline-delimited texts
    pub texts: String,
    /// Requested language code
    pub language: String,
    /// Uploaded reference audio (batch has no preset path)
    pub upload: Option<UploadedReference>,
}

/// Result of a completed single synthesis
#[derive(Debug)]
pub struct SynthesisOutput {
    /// Output file name
    pub filename: String,
    /// Path of the persisted output file
    pub path: PathBuf,
    /// The WAV bytes exactly as persisted
    pub audio: Vec<u8>,
    /// Duration of the synthesized audio in seconds
    pub duration_secs: f32,
    /// Sample rate of the synthesized audio in Hz
    pub sample_rate: u32,
}

/// Outcome of one batch item
#[derive(Debug)]
pub struct BatchItem {
    /// Position in the submitted text list
    pub index: usize,
    /// The submitted text
    pub text: String,
    /// Output file name on success, error message on failure
    pub outcome: Result<BatchItemOutput, String>,
}

/// Success payload of one batch item
#[derive(Debug)]
pub struct BatchItemOutput {
    /// Output file name
    pub filename: String,
    /// Duration of the synthesized audio in seconds
    pub duration_secs: f32,
}

/// Result of a batch synthesis request
#[derive(Debug)]
pub struct BatchOutcome {
    /// Number of items processed
    pub total: usize,
    /// Per-item outcomes, in submission order
    pub items: Vec<BatchItem>,
}

/// The reference recording a request resolved to
///
/// Uploads live in a temp file the request owns; presets are read in
/// place and never deleted.
#[derive(Debug)]
enum ResolvedReference {
    Upload(TempAudio),
    Preset(PathBuf),
}

impl ResolvedReference {
    fn path(&self) -> &Path {
        match self {
            Self::Upload(temp) => temp.path(),
            Self::Preset(path) => path,
        }
    }
}

/// Service orchestrating voice-cloning synthesis requests
pub struct SynthesisService {
    audio: Arc<dyn AudioPort>,
    engine: Arc<dyn EnginePort>,
    config: SynthesisConfig,
}

impl fmt::Debug for SynthesisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthesisService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SynthesisService {
    /// Create a new synthesis service
    pub fn new(
        audio: Arc<dyn AudioPort>,
        engine: Arc<dyn EnginePort>,
        config: SynthesisConfig,
    ) -> Self {
        Self {
            audio,
            engine,
            config,
        }
    }

    /// Synthesize one text in the requested reference voice
    ///
    /// # Errors
    ///
    /// Returns validation errors before any temporary file exists,
    /// `ApplicationError::NotFound` for a cataloged preset missing on
    /// disk, `ApplicationError::InvalidReference` for unusable audio
    /// and engine errors from the synthesis run.
    #[instrument(skip(self, command), fields(language = %command.language, text_len = command.text.len()))]
    pub async fn synthesize(
        &self,
        command: SynthesizeCommand,
    ) -> Result<SynthesisOutput, ApplicationError> {
        let text = SynthesisText::new(command.text)?;
        let language = Language::parse(&command.language)?;

        let reference = self
            .resolve_reference(command.upload, command.sample)
            .await?;
        let conditioned = self.prepare_reference(reference.path(), language).await?;
        let staged = self
            .audio
            .stage(&conditioned, &self.config.temp_dir)
            .await?;

        let filename = output_name(
            &format!("synthesis_{}", language.code()),
            language,
            &text,
            &conditioned,
        );
        let output_path = self.config.output_dir.join(&filename);

        let produced = self
            .run_engine(&text, language, staged.path(), output_path.clone())
            .await?;

        let audio = tokio::fs::read(&produced.output_path).await.map_err(|e| {
            ApplicationError::Internal(format!("Failed to read synthesized output: {e}"))
        })?;

        info!(
            filename = %filename,
            duration_secs = produced.duration_secs,
            "Synthesis complete"
        );

        Ok(SynthesisOutput {
            filename,
            path: produced.output_path,
            audio,
            duration_secs: produced.duration_secs,
            sample_rate: produced.sample_rate,
        })
    }

    /// Synthesize several texts against one shared reference voice
    ///
    /// The reference is decoded and conditioned once. One item's failure
    /// is recorded in that item's outcome and never aborts the rest.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::EngineNotReady` when the model has not
    /// loaded, plus the same validation and reference errors as single
    /// synthesis for the shared inputs.
    #[instrument(skip(self, command), fields(language = %command.language))]
    pub async fn synthesize_batch(
        &self,
        command: BatchCommand,
    ) -> Result<BatchOutcome, ApplicationError> {
        let language = Language::parse(&command.language)?;

        if !self.engine.is_ready() {
            return Err(ApplicationError::EngineNotReady(
                "model is still loading".to_string(),
            ));
        }

        let texts = split_batch_texts(&command.texts);
        if texts.is_empty() {
            return Err(DomainError::EmptyText.into());
        }

        let Some(upload) = command.upload else {
            return Err(DomainError::MissingReferenceSource.into());
        };
        let reference = self.stage_upload(upload).await?;
        let conditioned = self.prepare_reference(reference.path(), language).await?;
        let staged = self
            .audio
            .stage(&conditioned, &self.config.temp_dir)
            .await?;

        let mut items = Vec::with_capacity(texts.len());
        for (index, raw) in texts.into_iter().enumerate() {
            let outcome = self
                .synthesize_batch_item(index, &raw, language, &conditioned, staged.path())
                .await;
            if let Err(e) = &outcome {
                warn!(index, error = %e, "Batch item failed");
            }
            items.push(BatchItem {
                index,
                text: raw,
                outcome: outcome.map_err(|e| e.to_string()),
            });
        }

        info!(
            total = items.len(),
            failed = items.iter().filter(|i| i.outcome.is_err()).count(),
            "Batch synthesis complete"
        );

        Ok(BatchOutcome {
            total: items.len(),
            items,
        })
    }

    async fn synthesize_batch_item(
        &self,
        index: usize,
        raw: &str,
        language: Language,
        conditioned: &ReferenceAudio,
        staged: &Path,
    ) -> Result<BatchItemOutput, ApplicationError> {
        let text = SynthesisText::new(raw)?;
        let filename = output_name(&format!("batch_{index}"), language, &text, conditioned);
        let output_path = self.config.output_dir.join(&filename);

        let produced = self.run_engine(&text, language, staged, output_path).await?;

        Ok(BatchItemOutput {
            filename,
            duration_secs: produced.duration_secs,
        })
    }

    /// Pick the reference source: a cataloged preset wins, otherwise the
    /// upload, otherwise the request is rejected
    async fn resolve_reference(
        &self,
        upload: Option<UploadedReference>,
        sample: Option<String>,
    ) -> Result<ResolvedReference, ApplicationError> {
        if let Some(name) = sample.filter(|n| !n.trim().is_empty()) {
            if VoiceCatalog::find(&name).is_some() {
                let path = self.config.samples_dir.join(&name);
                if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                    return Err(ApplicationError::NotFound(
                        DomainError::SampleNotFound(name).to_string(),
                    ));
                }
                debug!(sample = %path.display(), "Using preset reference voice");
                return Ok(ResolvedReference::Preset(path));
            }
            debug!(sample = %name, "Sample not in catalog, falling back to upload");
        }

        let Some(upload) = upload else {
            return Err(DomainError::MissingReferenceSource.into());
        };
        Ok(ResolvedReference::Upload(self.stage_upload(upload).await?))
    }

    /// Persist an upload to a request-owned temp file, extension checked
    async fn stage_upload(&self, upload: UploadedReference) -> Result<TempAudio, ApplicationError> {
        let extension = upload_extension(&upload.filename)?;
        let file_name = format!("upload_{}.{extension}", short_id());
        TempAudio::write(&self.config.temp_dir, &file_name, &upload.bytes).await
    }

    async fn prepare_reference(
        &self,
        path: &Path,
        language: Language,
    ) -> Result<ReferenceAudio, ApplicationError> {
        let decoded = self.audio.decode(path).await?;
        self.audio.condition(decoded, language)
    }

    /// Run the engine and apply the optional tempo stage to its output
    async fn run_engine(
        &self,
        text: &SynthesisText,
        language: Language,
        reference: &Path,
        output_path: PathBuf,
    ) -> Result<crate::ports::EngineOutput, ApplicationError> {
        let produced = self
            .engine
            .synthesize(EngineRequest {
                text: text.as_str().to_owned(),
                language,
                reference_path: reference.to_path_buf(),
                output_path,
            })
            .await?;

        if self.config.apply_speech_rate {
            let rate = language.profile().speech_rate;
            self.audio.adjust_tempo(&produced.output_path, rate).await?;
        }

        Ok(produced)
    }
}

/// Content-addressed output file name
///
/// The digest covers the text, the language and the conditioned
/// reference samples; the request id keeps identical inputs from
/// overwriting an earlier response that may still be streaming.
fn output_name(
    prefix: &str,
    language: Language,
    text: &SynthesisText,
    reference: &ReferenceAudio,
) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(text.as_str().as_bytes());
    hasher.update(language.code().as_bytes());
    for sample in &reference.samples {
        hasher.update(&sample.to_le_bytes());
    }
    let digest = hasher.finalize().to_hex();

    format!("{prefix}_{}_{}.wav", &digest.as_str()[..16], short_id())
}

/// 8-hex-char request id
fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
