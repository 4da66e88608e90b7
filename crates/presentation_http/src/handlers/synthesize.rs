//! Synthesis handlers
//!
//! Both endpoints take a multipart form. The single endpoint answers
//! with the WAV bytes; the batch endpoint answers with a JSON report,
//! one entry per submitted line.

use application::{BatchCommand, BatchOutcome, SynthesizeCommand, UploadedReference};
use axum::{
    Json,
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Fields collected from a synthesis multipart form
#[derive(Debug, Default)]
struct SynthesisForm {
    text: Option<String>,
    texts: Option<String>,
    language: Option<String>,
    sample: Option<String>,
    upload: Option<UploadedReference>,
}

impl SynthesisForm {
    /// Read all fields from the multipart stream
    ///
    /// Empty text values are treated as absent so that forms with blank
    /// inputs fail with the validation error, not a parsing one.
    async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {e}")))?
        {
            let Some(name) = field.name().map(ToOwned::to_owned) else {
                continue;
            };

            match name.as_str() {
                "text" => form.text = Some(read_text(field).await?),
                "texts" => form.texts = Some(read_text(field).await?),
                "language" => {
                    let value = read_text(field).await?;
                    if !value.trim().is_empty() {
                        form.language = Some(value);
                    }
                }
                "sample_audio" => {
                    let value = read_text(field).await?;
                    if !value.trim().is_empty() {
                        form.sample = Some(value);
                    }
                }
                "reference_audio" => {
                    let filename = field.file_name().map(ToOwned::to_owned);
                    let bytes = field.bytes().await.map_err(|e| {
                        ApiError::BadRequest(format!("Failed to read reference audio: {e}"))
                    })?;
                    if !bytes.is_empty() {
                        form.upload = Some(UploadedReference {
                            filename: filename
                                .ok_or_else(|| {
                                    ApiError::BadRequest(
                                        "Reference audio is missing a file name".to_string(),
                                    )
                                })?,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    fn language(&self) -> String {
        self.language.clone().unwrap_or_else(|| "en".to_string())
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read form field: {e}")))
}

/// Synthesize one text and answer with the WAV file
#[instrument(skip_all)]
pub async fn synthesize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = SynthesisForm::read(&mut multipart).await?;
    let language = form.language();

    let output = state
        .synthesis
        .synthesize(SynthesizeCommand {
            text: form.text.unwrap_or_default(),
            language,
            upload: form.upload,
            sample: form.sample,
        })
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", output.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        output.audio,
    )
        .into_response())
}

/// One entry in the batch synthesis report
#[derive(Debug, Serialize)]
pub struct BatchResultEntry {
    /// Position in the submitted text list
    pub index: usize,
    /// The submitted text
    pub text: String,
    /// "success" or "error"
    pub status: String,
    /// Output file name, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Failure reason, present on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Batch synthesis response
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    /// Number of items processed
    pub total: usize,
    /// Per-item results, in submission order
    pub results: Vec<BatchResultEntry>,
}

impl From<BatchOutcome> for BatchResponse {
    fn from(outcome: BatchOutcome) -> Self {
        let results = outcome
            .items
            .into_iter()
            .map(|item| match item.outcome {
                Ok(output) => BatchResultEntry {
                    index: item.index,
                    text: item.text,
                    status: "success".to_string(),
                    filename: Some(output.filename),
                    error: None,
                },
                Err(reason) => BatchResultEntry {
                    index: item.index,
                    text: item.text,
                    status: "error".to_string(),
                    filename: None,
                    error: Some(reason),
                },
            })
            .collect();

        Self {
            total: outcome.total,
            results,
        }
    }
}

/// Synthesize several texts against one reference and report per-item results
#[instrument(skip_all)]
pub async fn synthesize_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, ApiError> {
    let form = SynthesisForm::read(&mut multipart).await?;
    let language = form.language();

    let outcome = state
        .synthesis
        .synthesize_batch(BatchCommand {
            texts: form.texts.unwrap_or_default(),
            language,
            upload: form.upload,
        })
        .await?;

    Ok(Json(outcome.into()))
}
