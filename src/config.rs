//! Configuration parsing and management for talkinghead

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, TalkingHeadError};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub assets: AssetConfig,
    pub playback: PlaybackConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets: AssetConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TalkingHeadError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(s: &str) -> Result<Self, TalkingHeadError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, TalkingHeadError> {
        let paths = [
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TalkingHeadError> {
        if self.playback.fade_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "playback.fade_duration".to_string(),
                message: "Fade duration must be greater than 0".to_string(),
            }
            .into());
        }

        if self.playback.fps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "playback.fps".to_string(),
                message: "Frame rate must be greater than 0".to_string(),
            }
            .into());
        }

        if self.assets.default_script.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "assets.default_script".to_string(),
                message: "Default script name must not be empty".to_string(),
            }
            .into());
        }

        if !self.assets.audio_dir.exists() {
            tracing::warn!(
                "Audio directory does not exist: {}",
                self.assets.audio_dir.display()
            );
        }

        Ok(())
    }
}

/// Asset location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory containing `<script>.mp3` / `<script>.json` pairs
    pub audio_dir: PathBuf,
    /// Script selected on startup
    pub default_script: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from("audios"),
            default_script: "welcome".to_string(),
        }
    }
}

/// Playback and animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Crossfade window for clip transitions in seconds
    pub fade_duration: f32,
    /// Simulated frame rate for the headless demo loop
    pub fps: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fade_duration: 0.5,
            fps: 60,
        }
    }
}
