//! Preset voice sample catalog handler

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use domain::{Language, VoiceCatalog};
use serde::Serialize;

use crate::state::AppState;

/// One preset voice in the catalog
#[derive(Debug, Serialize)]
pub struct VoiceEntry {
    /// Sample file name, the value to pass as `sample_audio`
    pub filename: String,
    /// Human-readable speaker name
    pub name: String,
}

/// Voices available for one language
#[derive(Debug, Serialize)]
pub struct LanguageVoices {
    /// Display name of the language
    pub language: String,
    /// Voices with a sample file present on disk
    pub voices: Vec<VoiceEntry>,
}

/// List the preset voices, filtered to samples that exist on disk
///
/// The catalog is static; what ships in the samples directory is not.
/// Only voices whose file is actually present are advertised.
pub async fn list_samples(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, LanguageVoices>> {
    let samples_dir = &state.config.storage.samples_dir;
    let mut catalog = BTreeMap::new();

    for language in Language::ALL {
        let mut voices = Vec::new();
        for sample in VoiceCatalog::for_language(language) {
            let path = samples_dir.join(sample.filename);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                voices.push(VoiceEntry {
                    filename: sample.filename.to_string(),
                    name: sample.display_name.to_string(),
                });
            }
        }
        catalog.insert(
            language.code().to_string(),
            LanguageVoices {
                language: language.display_name().to_string(),
                voices,
            },
        );
    }

    Json(catalog)
}
