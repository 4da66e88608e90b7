//! Application state shared across handlers

use std::sync::Arc;

use application::{SynthesisService, ports::EnginePort};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Synthesis service orchestrating the cloning pipeline
    pub synthesis: Arc<SynthesisService>,
    /// Engine port, for readiness reporting
    pub engine: Arc<dyn EnginePort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
