//! Application configuration
//!
//! Loaded from an optional `config.toml` plus `MYNA_*` environment
//! variables, with a `PORT` override for container platforms that
//! inject one.

use std::{fmt, path::PathBuf};

use ai_speech::{BridgeConfig, EngineConfig};
use serde::{Deserialize, Serialize};

/// Application environment (development or production)
///
/// Controls the log format and default behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - human-readable logs
    #[default]
    Development,
    /// Production environment - structured JSON logs
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds, sized for synthesis runs
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum multipart upload size in bytes
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    7860
}

const fn default_request_timeout() -> u64 {
    300
}

const fn default_max_upload() -> usize {
    50 * 1024 * 1024 // 50MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

/// Reference-audio pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Transcoder settings for non-WAV uploads
    #[serde(flatten)]
    pub bridge: BridgeConfig,

    /// Apply the language profile's lowpass filter during conditioning
    #[serde(default)]
    pub apply_lowpass: bool,

    /// Stretch synthesized output to the language profile's speech rate
    #[serde(default)]
    pub apply_speech_rate: bool,
}

/// On-disk layout for samples and synthesized output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the preset voice samples
    #[serde(default = "default_samples_dir")]
    pub samples_dir: PathBuf,

    /// Directory synthesized audio is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_samples_dir() -> PathBuf {
    PathBuf::from("samples")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            samples_dir: default_samples_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Synthesis engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Audio pipeline configuration
    #[serde(default)]
    pub audio: AudioConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error when the file or an environment variable cannot
    /// be parsed into the expected shape.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., MYNA_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("MYNA")
                    .separator("_")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_port_override(std::env::var("PORT").ok());
        Ok(config)
    }

    /// Apply the bare `PORT` variable hosting platforms set
    ///
    /// Wins over both the config file and `MYNA_SERVER_PORT`. Unparsable
    /// values are ignored.
    pub fn apply_port_override(&mut self, value: Option<String>) {
        if let Some(port) = value.and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Validate the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        self.audio.bridge.validate()?;
        if self.server.max_upload_bytes == 0 {
            return Err("server.max_upload_bytes must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Check whether the production environment is active
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
