//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer. Contains the
//! audio pipeline and synthesis engine adapters plus configuration
//! loading.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::{AppConfig, AudioConfig, Environment, ServerConfig, StorageConfig};
