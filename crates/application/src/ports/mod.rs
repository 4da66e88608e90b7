//! Port definitions
//!
//! Interfaces the application layer depends on. Implemented by
//! infrastructure adapters over the audio pipeline and the synthesis
//! engine.

pub mod audio_port;
pub mod engine_port;

pub use audio_port::{AudioPort, ReferenceAudio, TempAudio};
pub use engine_port::{EngineOutput, EnginePort, EngineRequest};

#[cfg(test)]
pub use audio_port::MockAudioPort;
#[cfg(test)]
pub use engine_port::MockEnginePort;
