//! talkinghead - lip-synced 3D avatar playback core
//!
//! Drives a single rigged avatar from precomputed lip-sync data:
//! - Plays idle/greeting/angry skeletal clips with fixed-window crossfades
//! - Maps the audio clock to viseme cues and writes binary morph-target
//!   weights onto the head and teeth meshes every frame
//! - Models the audio element as a transport clock with a one-shot end event
//!
//! Everything runs inside the host's per-frame render callback on a single
//! thread; there is no background work and no synchronization.

pub mod config;
pub mod error;
pub mod lipsync;
pub mod player;
pub mod rig;

pub use config::Config;
pub use error::{Result, TalkingHeadError};
pub use lipsync::{Timeline, Viseme};
pub use player::{AnimationName, Player, ScriptLibrary};
pub use rig::{AnimationClip, AnimationMixer, MorphMesh};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
