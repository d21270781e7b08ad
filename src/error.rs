//! Error types for talkinghead

use thiserror::Error;

/// Main error type for talkinghead
#[derive(Error, Debug)]
pub enum TalkingHeadError {
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Animation clip error: {0}")]
    Clip(#[from] ClipError),

    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lip-sync timeline errors
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Failed to read timeline file: {0}")]
    ReadFile(String),

    #[error("Failed to parse timeline JSON: {0}")]
    Parse(String),

    #[error("Cue {index} has end {end} before start {start}")]
    InvertedCue { index: usize, start: f64, end: f64 },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Skeletal clip errors
#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Clip has no tracks after normalization: {0}")]
    Empty(String),

    #[error("Unknown animation clip: {0}")]
    UnknownClip(String),

    #[error("Track {track} has no keyframes")]
    EmptyTrack { track: String },
}

/// Playback errors
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Script not found: {0}")]
    ScriptNotFound(String),
}

/// Result type alias for talkinghead operations
pub type Result<T> = std::result::Result<T, TalkingHeadError>;
