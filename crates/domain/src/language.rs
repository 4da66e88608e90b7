//! Supported synthesis languages
//!
//! The language set is fixed at compile time; every request resolves
//! to one of these variants before any audio work starts.
//!
//! # Examples
//!
//! ```
//! use domain::Language;
//!
//! let lang = Language::parse("en").unwrap();
//! assert_eq!(lang.code(), "en");
//! assert_eq!(lang.display_name(), "English");
//!
//! assert!(Language::parse("fr").is_err());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A language the synthesis engine can speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// German
    De,
}

impl Language {
    /// All supported languages, in catalog order
    pub const ALL: [Self; 2] = [Self::En, Self::De];

    /// The ISO 639-1 code passed to the synthesis engine
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// Human-readable name shown in catalog responses
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "German",
        }
    }

    /// Parse a language code
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedLanguage` for codes outside the
    /// supported set.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        match code.trim() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            other => Err(DomainError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_supported_codes() {
        assert_eq!(Language::parse("en").unwrap(), Language::En);
        assert_eq!(Language::parse("de").unwrap(), Language::De);
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(Language::parse(" en ").unwrap(), Language::En);
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert!(Language::parse("fr").is_err());
        assert!(Language::parse("").is_err());
        assert!(Language::parse("english").is_err());
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(Language::parse("EN").is_err());
    }

    #[test]
    fn unknown_code_is_reported_in_error() {
        let err = Language::parse("xx").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported language: xx");
    }

    #[test]
    fn codes_and_display_names() {
        assert_eq!(Language::En.code(), "en");
        assert_eq!(Language::En.display_name(), "English");
        assert_eq!(Language::De.code(), "de");
        assert_eq!(Language::De.display_name(), "German");
    }

    #[test]
    fn all_lists_every_language() {
        assert_eq!(Language::ALL.len(), 2);
        for lang in Language::ALL {
            assert_eq!(Language::parse(lang.code()).unwrap(), lang);
        }
    }

    #[test]
    fn display_uses_code() {
        assert_eq!(Language::De.to_string(), "de");
    }

    #[test]
    fn from_str_parses() {
        let lang: Language = "de".parse().unwrap();
        assert_eq!(lang, Language::De);
    }

    #[test]
    fn serializes_as_lowercase_code() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        assert_eq!(serde_json::to_string(&Language::De).unwrap(), "\"de\"");
    }

    #[test]
    fn deserializes_from_code() {
        let lang: Language = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(lang, Language::De);
    }
}
