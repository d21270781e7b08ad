//! Playback facade: wires the transport, selector, mixer, and viseme driver

pub mod scripts;
pub mod selector;
pub mod transport;

pub use scripts::{ScriptAssets, ScriptLibrary};
pub use selector::AnimationName;
pub use transport::{AudioTransport, TransportEvent};

use crate::error::Result;
use crate::lipsync::driver::apply_visemes;
use crate::lipsync::timeline::Timeline;
use crate::rig::clip::AnimationClip;
use crate::rig::mixer::AnimationMixer;
use crate::rig::morph::MorphMesh;

/// The per-frame playback state for one avatar.
///
/// Owns the selected script's timeline and transport, the clip mixer, and the
/// two morph-target meshes. Everything runs on the caller's render thread:
/// external inputs are the play trigger and the script selector, and
/// [`Player::update`] is the per-frame callback.
#[derive(Debug)]
pub struct Player {
    animation: AnimationName,
    play_trigger: bool,
    script: String,
    timeline: Timeline,
    transport: AudioTransport,
    mixer: AnimationMixer,
    head: MorphMesh,
    teeth: MorphMesh,
}

impl Player {
    /// Build a player from the three skeletal clips and the facial meshes.
    /// Starts in `Idle` with no script loaded.
    pub fn new(
        clips: Vec<AnimationClip>,
        fade_duration: f32,
        head: MorphMesh,
        teeth: MorphMesh,
    ) -> Result<Self> {
        let mut mixer = AnimationMixer::new(clips, fade_duration);

        // Fail up front if any of the three clips is missing.
        for name in AnimationName::ALL {
            if !mixer.has_clip(name.as_str()) {
                return Err(crate::error::ClipError::UnknownClip(name.as_str().to_string()).into());
            }
        }
        mixer.transition_to(AnimationName::Idle.as_str())?;

        Ok(Self {
            animation: AnimationName::Idle,
            play_trigger: false,
            script: String::new(),
            timeline: Timeline::default(),
            transport: AudioTransport::new(0.0),
            mixer,
            head,
            teeth,
        })
    }

    /// Swap in a new script's timeline and audio clock.
    ///
    /// If the play trigger is currently on, playback re-triggers from the
    /// start of the new clip, exactly as if the trigger had just been turned
    /// on.
    pub fn load_script(&mut self, name: &str, timeline: Timeline) -> Result<()> {
        tracing::info!("Loading script: {} ({} cues)", name, timeline.len());
        self.transport = AudioTransport::new(timeline.audio_duration());
        self.timeline = timeline;
        self.script = name.to_string();

        if self.play_trigger {
            self.begin_playback()?;
        }
        Ok(())
    }

    /// The externally driven play toggle.
    ///
    /// Turning it on always rewinds the audio to 0 before playing — rapid
    /// off/on restarts the clip, never resumes it. Turning it off pauses the
    /// audio and forces `Idle` immediately without waiting for a natural end.
    pub fn set_play_trigger(&mut self, on: bool) -> Result<()> {
        self.play_trigger = on;
        if on {
            self.begin_playback()
        } else {
            self.transport.pause();
            self.select(AnimationName::Idle)
        }
    }

    fn begin_playback(&mut self) -> Result<()> {
        self.select(AnimationName::Greeting)?;
        self.transport.rewind();
        self.transport.play();
        Ok(())
    }

    /// Change the selected animation; a no-op when already selected.
    pub fn select(&mut self, name: AnimationName) -> Result<()> {
        if name != self.animation {
            tracing::info!("Animation: {} -> {}", self.animation, name);
            self.animation = name;
            self.mixer.transition_to(name.as_str())?;
        }
        Ok(())
    }

    /// The per-frame callback: advances the audio clock, routes the
    /// end-of-clip event to the selector, advances clip fades, and rewrites
    /// the viseme weights from the current audio time.
    pub fn update(&mut self, dt: f32) -> Result<()> {
        if let Some(TransportEvent::Ended) = self.transport.advance(dt as f64) {
            tracing::debug!("Audio ended, returning to Idle");
            self.select(AnimationName::Idle)?;
        }

        self.mixer.update(dt);

        apply_visemes(
            &self.timeline,
            self.transport.position(),
            &mut [&mut self.head, &mut self.teeth],
        );

        Ok(())
    }

    pub fn animation(&self) -> AnimationName {
        self.animation
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn audio_position(&self) -> f64 {
        self.transport.position()
    }

    pub fn audio_duration(&self) -> f64 {
        self.transport.duration()
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    pub fn head(&self) -> &MorphMesh {
        &self.head
    }

    pub fn teeth(&self) -> &MorphMesh {
        &self.teeth
    }

    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }
}
