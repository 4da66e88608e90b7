//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod audio_adapter;
mod engine_adapter;

pub use audio_adapter::AudioAdapter;
pub use engine_adapter::EngineAdapter;
