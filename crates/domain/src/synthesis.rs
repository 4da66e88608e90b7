//! Synthesis request validation rules
//!
//! # Examples
//!
//! ```
//! use domain::SynthesisText;
//!
//! let text = SynthesisText::new("Hello there.").unwrap();
//! assert_eq!(text.as_str(), "Hello there.");
//!
//! assert!(SynthesisText::new("   ").is_err());
//! ```

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// Maximum synthesis text length, in characters
pub const MAX_TEXT_CHARS: usize = 5000;

/// Upload file extensions the service accepts, lowercase without dot
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["wav", "mp3", "flac", "m4a", "ogg"];

/// Validated text for synthesis
///
/// Guarantees the text is not blank and does not exceed
/// [`MAX_TEXT_CHARS`] characters. The original text is preserved as
/// written, including surrounding whitespace, since pacing cues can
/// matter to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct SynthesisText {
    #[validate(length(max = 5000))]
    value: String,
}

impl SynthesisText {
    /// Create validated synthesis text
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyText` for blank input and
    /// `DomainError::TextTooLong` past the character limit.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let value = text.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyText);
        }

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|_| DomainError::text_too_long(candidate.char_count()))?;

        Ok(candidate)
    }

    /// The text as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Length in characters
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }
}

impl fmt::Display for SynthesisText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for SynthesisText {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SynthesisText {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Extract and check the extension of an uploaded reference file
///
/// Matching is case-insensitive against [`ACCEPTED_EXTENSIONS`]; the
/// returned extension is lowercase without the leading dot.
///
/// # Errors
///
/// Returns `DomainError::UnsupportedAudioFormat` when the filename has
/// no extension or one outside the accepted set.
pub fn upload_extension(filename: &str) -> Result<String, DomainError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else if ext.is_empty() {
        Err(DomainError::UnsupportedAudioFormat(filename.to_string()))
    } else {
        Err(DomainError::UnsupportedAudioFormat(ext))
    }
}

/// Split newline-delimited batch input into trimmed, non-empty texts
#[must_use]
pub fn split_batch_texts(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
