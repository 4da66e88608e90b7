//! Application layer - Use cases and orchestration
//!
//! Contains the synthesis use cases and the port definitions the
//! infrastructure adapters implement. Orchestrates domain objects and
//! infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
