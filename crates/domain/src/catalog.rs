//! Preset voice sample catalog
//!
//! Reference voices bundled with the service, selectable by filename
//! instead of uploading audio. The catalog is declarative; whether a
//! sample file actually exists on disk is checked at the serving layer.
//!
//! # Examples
//!
//! ```
//! use domain::{Language, VoiceCatalog};
//!
//! let sample = VoiceCatalog::find("morgan_freeman.wav").unwrap();
//! assert_eq!(sample.display_name, "Morgan Freeman");
//! assert_eq!(sample.language, Language::En);
//! ```

use serde::Serialize;

use crate::language::Language;

/// A bundled reference voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoiceSample {
    /// File name under the samples directory
    pub filename: &'static str,
    /// Human-readable speaker name
    pub display_name: &'static str,
    /// Language the sample is cataloged under
    pub language: Language,
}

const SAMPLES: [VoiceSample; 10] = [
    VoiceSample {
        filename: "donald_trump.wav",
        display_name: "Donald Trump",
        language: Language::En,
    },
    VoiceSample {
        filename: "elon_musk.wav",
        display_name: "Elon Musk",
        language: Language::En,
    },
    VoiceSample {
        filename: "harry_kane.wav",
        display_name: "Harry Kane",
        language: Language::En,
    },
    VoiceSample {
        filename: "morgan_freeman.wav",
        display_name: "Morgan Freeman",
        language: Language::En,
    },
    VoiceSample {
        filename: "taylor_swift.wav",
        display_name: "Taylor Swift",
        language: Language::En,
    },
    VoiceSample {
        filename: "anke_engelke.wav",
        display_name: "Anke Engelke",
        language: Language::De,
    },
    VoiceSample {
        filename: "günther_jauch.wav",
        display_name: "Günther Jauch",
        language: Language::De,
    },
    VoiceSample {
        filename: "heiner_lauterbach.wav",
        display_name: "Heiner Lauterbach",
        language: Language::De,
    },
    VoiceSample {
        filename: "herbert_grönemeyer.wav",
        display_name: "Herbert Grönemeyer",
        language: Language::De,
    },
    VoiceSample {
        filename: "thomas_müller.wav",
        display_name: "Thomas Müller",
        language: Language::De,
    },
];

/// Catalog of bundled voice samples
#[derive(Debug, Clone, Copy)]
pub struct VoiceCatalog;

impl VoiceCatalog {
    /// Every cataloged sample, in catalog order
    #[must_use]
    pub const fn all() -> &'static [VoiceSample] {
        &SAMPLES
    }

    /// Samples cataloged under a language
    pub fn for_language(language: Language) -> impl Iterator<Item = &'static VoiceSample> {
        SAMPLES.iter().filter(move |s| s.language == language)
    }

    /// Look up a sample by filename across all languages
    #[must_use]
    pub fn find(filename: &str) -> Option<&'static VoiceSample> {
        SAMPLES.iter().find(|s| s.filename == filename)
    }
}
