//! Language catalog handler

use std::collections::BTreeMap;

use axum::Json;
use domain::Language;
use serde::Serialize;

/// Language catalog response
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    /// Language code mapped to its display name
    pub languages: BTreeMap<String, String>,
    /// Number of supported languages
    pub total: usize,
}

/// List the supported synthesis languages
pub async fn list_languages() -> Json<LanguagesResponse> {
    let languages: BTreeMap<String, String> = Language::ALL
        .iter()
        .map(|l| (l.code().to_string(), l.display_name().to_string()))
        .collect();

    Json(LanguagesResponse {
        total: languages.len(),
        languages,
    })
}
