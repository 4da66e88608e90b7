//! Domain layer for Myna
//!
//! Core vocabulary of the voice-cloning service: supported languages,
//! per-language generation profiles, the preset voice catalog, and the
//! validation rules for synthesis requests. No IO and no async here.

pub mod catalog;
pub mod errors;
pub mod language;
pub mod profile;
pub mod synthesis;

pub use catalog::{VoiceCatalog, VoiceSample};
pub use errors::DomainError;
pub use language::Language;
pub use profile::LanguageProfile;
pub use synthesis::{
    ACCEPTED_EXTENSIONS, MAX_TEXT_CHARS, SynthesisText, split_batch_texts, upload_extension,
};
