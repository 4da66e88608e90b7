//! Configuration for the synthesis engine and the format bridge

use serde::{Deserialize, Serialize};

use crate::types::TARGET_SAMPLE_RATE;

/// Configuration for the XTTS synthesis engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine CLI command (binary name or absolute path)
    #[serde(default = "default_command")]
    pub command: String,

    /// Model identifier passed to the engine
    #[serde(default = "default_model")]
    pub model: String,

    /// Timeout for a single synthesis run in seconds
    #[serde(default = "default_synthesis_timeout_secs")]
    pub synthesis_timeout_secs: u64,
}

fn default_command() -> String {
    "xtts".to_string()
}

fn default_model() -> String {
    "tts_models/multilingual/multi-dataset/xtts_v2".to_string()
}

const fn default_synthesis_timeout_secs() -> u64 {
    240
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            model: default_model(),
            synthesis_timeout_secs: default_synthesis_timeout_secs(),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if a field has an unusable value.
    pub fn validate(&self) -> Result<(), String> {
        if self.command.trim().is_empty() {
            return Err("Engine command must not be empty".to_string());
        }

        if self.model.trim().is_empty() {
            return Err("Engine model must not be empty".to_string());
        }

        if self.synthesis_timeout_secs == 0 {
            return Err("Synthesis timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Configuration for decoding uploads into engine-ready audio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// FFmpeg command used for fallback transcoding
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Timeout for a single transcode in seconds
    #[serde(default = "default_transcode_timeout_secs")]
    pub transcode_timeout_secs: u64,

    /// Sample rate reference audio is converted to
    #[serde(default = "default_target_sample_rate")]
    pub target_sample_rate: u32,
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

const fn default_transcode_timeout_secs() -> u64 {
    30
}

const fn default_target_sample_rate() -> u32 {
    TARGET_SAMPLE_RATE
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            transcode_timeout_secs: default_transcode_timeout_secs(),
            target_sample_rate: default_target_sample_rate(),
        }
    }
}

impl BridgeConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if a field has an unusable value.
    pub fn validate(&self) -> Result<(), String> {
        if self.ffmpeg_path.trim().is_empty() {
            return Err("FFmpeg path must not be empty".to_string());
        }

        if self.transcode_timeout_secs == 0 {
            return Err("Transcode timeout must be greater than 0".to_string());
        }

        if self.target_sample_rate == 0 {
            return Err("Target sample rate must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_config_has_expected_values() {
        let config = EngineConfig::default();

        assert_eq!(config.command, "xtts");
        assert_eq!(config.model, "tts_models/multilingual/multi-dataset/xtts_v2");
        assert_eq!(config.synthesis_timeout_secs, 240);
    }

    #[test]
    fn default_engine_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn engine_config_rejects_empty_command() {
        let config = EngineConfig {
            command: "  ".to_string(),
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.contains("command"));
    }

    #[test]
    fn engine_config_rejects_zero_timeout() {
        let config = EngineConfig {
            synthesis_timeout_secs: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn engine_config_deserializes_from_partial_toml() {
        let config: EngineConfig = toml::from_str("command = \"/opt/xtts/bin/xtts\"").unwrap();

        assert_eq!(config.command, "/opt/xtts/bin/xtts");
        assert_eq!(config.model, "tts_models/multilingual/multi-dataset/xtts_v2");
        assert_eq!(config.synthesis_timeout_secs, 240);
    }

    #[test]
    fn default_bridge_config_has_expected_values() {
        let config = BridgeConfig::default();

        assert_eq!(config.ffmpeg_path, "ffmpeg");
        assert_eq!(config.transcode_timeout_secs, 30);
        assert_eq!(config.target_sample_rate, 22_050);
    }

    #[test]
    fn default_bridge_config_is_valid() {
        assert!(BridgeConfig::default().validate().is_ok());
    }

    #[test]
    fn bridge_config_rejects_empty_ffmpeg_path() {
        let config = BridgeConfig {
            ffmpeg_path: String::new(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn bridge_config_rejects_zero_sample_rate() {
        let config = BridgeConfig {
            target_sample_rate: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn bridge_config_deserializes_from_partial_toml() {
        let config: BridgeConfig = toml::from_str("transcode_timeout_secs = 60").unwrap();

        assert_eq!(config.ffmpeg_path, "ffmpeg");
        assert_eq!(config.transcode_timeout_secs, 60);
        assert_eq!(config.target_sample_rate, 22_050);
    }
}
