//! AI Speech - voice-cloning synthesis engine and audio pipeline
//!
//! Provides everything between raw reference uploads and synthesized
//! speech:
//! - `FormatBridge` - decode uploads into mono sample buffers, with an
//!   FFmpeg fallback for non-WAV containers
//! - `condition` - trim, shape and level reference audio for cloning
//! - `SpeechSynthesizer` - the engine port, implemented by `XttsEngine`
//!   over an XTTS-style CLI runner
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the engine trait (port)
//! - `providers` module contains concrete implementations (adapters)
//! - `decode`, `condition`, `transcode` and `wav` hold the audio pipeline
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{FormatBridge, SpeechSynthesizer, SynthesisRequest, XttsEngine};
//!
//! let bridge = FormatBridge::with_config(&bridge_config);
//! let engine = XttsEngine::new(engine_config)?;
//!
//! let reference = bridge.decode(upload_path).await?;
//! let conditioned = ai_speech::condition_reference(reference, profile, options)?;
//! // stage `conditioned` to disk, then:
//! let outcome = engine.synthesize(request).await?;
//! ```

pub mod condition;
pub mod config;
pub mod decode;
pub mod error;
pub mod ports;
pub mod providers;
pub mod resample;
pub mod transcode;
pub mod types;
pub mod wav;

pub use condition::{ConditioningOptions, condition_reference};
pub use config::{BridgeConfig, EngineConfig};
pub use decode::FormatBridge;
pub use error::SpeechError;
pub use ports::SpeechSynthesizer;
pub use providers::XttsEngine;
pub use transcode::FfmpegTranscoder;
pub use types::{
    AudioBuffer, ContainerFormat, SynthesisOutcome, SynthesisRequest, TARGET_SAMPLE_RATE,
};
