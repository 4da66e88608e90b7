//! Synthesis engine implementations
//!
//! Contains concrete implementations of the `SpeechSynthesizer` trait.

pub mod xtts;

pub use xtts::XttsEngine;
