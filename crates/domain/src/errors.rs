//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Synthesis text is empty or whitespace-only
    #[error("Text cannot be empty")]
    EmptyText,

    /// Synthesis text exceeds the maximum length
    #[error("Text length {length} exceeds maximum of {max} characters")]
    TextTooLong { length: usize, max: usize },

    /// Language code is not in the supported set
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Uploaded file has an extension outside the accepted set
    #[error("Unsupported audio format: {0}")]
    UnsupportedAudioFormat(String),

    /// A catalog sample was requested but its file is missing
    #[error("Sample audio file not found: {0}")]
    SampleNotFound(String),

    /// Neither an upload nor a recognized sample name was provided
    #[error("Provide either a reference audio file or select a sample voice")]
    MissingReferenceSource,
}

impl DomainError {
    /// Create a text-too-long error for the given character count
    pub const fn text_too_long(length: usize) -> Self {
        Self::TextTooLong {
            length,
            max: crate::synthesis::MAX_TEXT_CHARS,
        }
    }
}
