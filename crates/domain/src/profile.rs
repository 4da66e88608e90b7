//! Per-language generation parameter profiles
//!
//! Each language carries a fixed bundle of generation-control
//! parameters tuned for voice consistency. The profile is looked up
//! once per request and never mutated; temperature and sampling bounds
//! are opaque tunables of the external engine, while `speech_rate` and
//! `lowpass_hz` feed the optional conditioning stages.

use serde::Serialize;

use crate::language::Language;

/// Generation-control parameters for one language
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanguageProfile {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling bound
    pub top_p: f32,
    /// Top-k sampling bound
    pub top_k: u32,
    /// Whether the engine may split text into sentences; disabled so
    /// the full text is processed as one continuous unit
    pub split_sentences: bool,
    /// Tempo multiplier for the optional time-stretch stage
    pub speech_rate: f32,
    /// Cutoff for the optional low-pass stage, in Hz
    pub lowpass_hz: u32,
}

// English tolerates slightly more sampling variation than German.
const EN: LanguageProfile = LanguageProfile {
    temperature: 0.52,
    top_p: 0.68,
    top_k: 35,
    split_sentences: false,
    speech_rate: 0.85,
    lowpass_hz: 8500,
};

// German stays conservative for clean end-of-utterance behavior and
// prefers a lower cutoff.
const DE: LanguageProfile = LanguageProfile {
    temperature: 0.50,
    top_p: 0.65,
    top_k: 30,
    split_sentences: false,
    speech_rate: 0.85,
    lowpass_hz: 8000,
};

impl LanguageProfile {
    /// Look up the profile for a language
    #[must_use]
    pub const fn for_language(language: Language) -> &'static Self {
        match language {
            Language::En => &EN,
            Language::De => &DE,
        }
    }
}

impl Language {
    /// The generation profile for this language
    #[must_use]
    pub const fn profile(self) -> &'static LanguageProfile {
        LanguageProfile::for_language(self)
    }
}
