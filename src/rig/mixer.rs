//! Clip action mixer: crossfaded transitions between looping skeletal clips

use glam::Quat;
use std::collections::HashMap;

use crate::error::ClipError;
use crate::rig::clip::AnimationClip;

/// Lifecycle of a single clip action.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ActionState {
    Stopped,
    FadingIn { elapsed: f32 },
    Playing,
    FadingOut { elapsed: f32 },
}

/// One clip bound to its playback state.
#[derive(Debug)]
struct ClipAction {
    clip: AnimationClip,
    /// Local clip time in seconds, wraps at the clip duration (looping)
    time: f32,
    state: ActionState,
}

impl ClipAction {
    fn is_running(&self) -> bool {
        !matches!(self.state, ActionState::Stopped)
    }

    /// Hard stop: no fade, local time discarded.
    fn stop(&mut self) {
        self.state = ActionState::Stopped;
        self.time = 0.0;
    }

    fn weight(&self, fade_duration: f32) -> f32 {
        match self.state {
            ActionState::Stopped => 0.0,
            ActionState::FadingIn { elapsed } => (elapsed / fade_duration).clamp(0.0, 1.0),
            ActionState::Playing => 1.0,
            ActionState::FadingOut { elapsed } => 1.0 - (elapsed / fade_duration).clamp(0.0, 1.0),
        }
    }
}

/// Owns one action per clip and enforces the transition contract: at most one
/// active clip, stale actions hard-stopped, outgoing and incoming clips
/// crossfaded over a fixed window.
#[derive(Debug)]
pub struct AnimationMixer {
    actions: Vec<ClipAction>,
    fade_duration: f32,
    /// Index of the clip most recently transitioned to
    active: Option<usize>,
}

impl AnimationMixer {
    pub fn new(clips: Vec<AnimationClip>, fade_duration: f32) -> Self {
        let actions = clips
            .into_iter()
            .map(|clip| ClipAction {
                clip,
                time: 0.0,
                state: ActionState::Stopped,
            })
            .collect();

        Self {
            actions,
            fade_duration,
            active: None,
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.actions.iter().position(|a| a.clip.name == name)
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Make `name` the active clip.
    ///
    /// Any action that is neither the outgoing active clip nor the target is
    /// stopped immediately (a stale fade-out from an earlier transition must
    /// not linger). The outgoing clip begins its fade-out, and the target is
    /// rewound to 0 and fades in from zero weight.
    pub fn transition_to(&mut self, name: &str) -> Result<(), ClipError> {
        let target = self
            .index_of(name)
            .ok_or_else(|| ClipError::UnknownClip(name.to_string()))?;

        if self.active == Some(target) {
            return Ok(());
        }

        for (i, action) in self.actions.iter_mut().enumerate() {
            if i == target {
                continue;
            }
            if Some(i) == self.active && action.is_running() {
                // Start the fade-out at the weight the action already holds,
                // so interrupting a fade-in never snaps the weight upward.
                let elapsed = match action.state {
                    ActionState::FadingIn { elapsed } => (self.fade_duration - elapsed).max(0.0),
                    _ => 0.0,
                };
                action.state = ActionState::FadingOut { elapsed };
            } else {
                action.stop();
            }
        }

        let action = &mut self.actions[target];
        action.time = 0.0;
        action.state = ActionState::FadingIn { elapsed: 0.0 };
        self.active = Some(target);

        tracing::debug!("Animation transition -> {}", name);
        Ok(())
    }

    /// Advance fades and local clip clocks by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for action in &mut self.actions {
            if !action.is_running() {
                continue;
            }

            // Looping local clock
            let duration = action.clip.duration();
            action.time += dt;
            if duration > 0.0 && action.time >= duration {
                action.time %= duration;
            }

            action.state = match action.state {
                ActionState::FadingIn { elapsed } => {
                    let elapsed = elapsed + dt;
                    if elapsed >= self.fade_duration {
                        ActionState::Playing
                    } else {
                        ActionState::FadingIn { elapsed }
                    }
                }
                ActionState::FadingOut { elapsed } => {
                    let elapsed = elapsed + dt;
                    if elapsed >= self.fade_duration {
                        ActionState::Stopped
                    } else {
                        ActionState::FadingOut { elapsed }
                    }
                }
                other => other,
            };

            if !action.is_running() {
                action.time = 0.0;
            }
        }
    }

    /// Name of the clip most recently transitioned to.
    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.actions[i].clip.name.as_str())
    }

    /// Current blend weight of a clip's action (0 when stopped or unknown).
    pub fn weight(&self, name: &str) -> f32 {
        self.index_of(name)
            .map(|i| self.actions[i].weight(self.fade_duration))
            .unwrap_or(0.0)
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.index_of(name)
            .map(|i| self.actions[i].is_running())
            .unwrap_or(false)
    }

    /// Blend every running action's sampled pose by its current weight.
    ///
    /// Accumulates with normalized slerp in action order, so during a
    /// crossfade the pose sweeps continuously from the outgoing clip to the
    /// incoming one.
    pub fn blended_pose(&self) -> HashMap<String, Quat> {
        let mut pose: HashMap<String, Quat> = HashMap::new();
        let mut total: HashMap<String, f32> = HashMap::new();

        for action in &self.actions {
            let weight = action.weight(self.fade_duration);
            if weight <= 0.0 {
                continue;
            }

            for (bone, rotation) in action.clip.sample_pose(action.time) {
                let acc_w = total.entry(bone.clone()).or_insert(0.0);
                let new_total = *acc_w + weight;
                let entry = pose.entry(bone).or_insert(rotation);
                *entry = entry.slerp(rotation, weight / new_total);
                *acc_w = new_total;
            }
        }

        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::clip::Track;
    use std::f32::consts::FRAC_PI_2;

    const FADE: f32 = 0.5;

    fn clip(name: &str, angle: f32) -> AnimationClip {
        AnimationClip::new(
            name,
            vec![Track::rotation(
                "Spine",
                vec![0.0, 2.0],
                vec![Quat::from_rotation_y(angle), Quat::from_rotation_y(angle)],
            )],
        )
        .unwrap()
    }

    fn mixer() -> AnimationMixer {
        AnimationMixer::new(
            vec![
                clip("Idle", 0.0),
                clip("Angry", FRAC_PI_2),
                clip("Greeting", -FRAC_PI_2),
            ],
            FADE,
        )
    }

    #[test]
    fn test_all_stopped_initially() {
        let m = mixer();
        assert_eq!(m.active(), None);
        for name in ["Idle", "Angry", "Greeting"] {
            assert_eq!(m.weight(name), 0.0);
            assert!(!m.is_running(name));
        }
    }

    #[test]
    fn test_fade_in_ramps_over_exact_window() {
        let mut m = mixer();
        m.transition_to("Idle").unwrap();
        assert_eq!(m.weight("Idle"), 0.0);

        m.update(0.25);
        assert!((m.weight("Idle") - 0.5).abs() < 1e-6);

        m.update(0.25);
        assert_eq!(m.weight("Idle"), 1.0);
    }

    #[test]
    fn test_crossfade_fades_old_out_and_new_in() {
        let mut m = mixer();
        m.transition_to("Idle").unwrap();
        m.update(1.0);
        assert_eq!(m.weight("Idle"), 1.0);

        m.transition_to("Greeting").unwrap();
        assert_eq!(m.active(), Some("Greeting"));

        m.update(0.25);
        assert!((m.weight("Idle") - 0.5).abs() < 1e-6);
        assert!((m.weight("Greeting") - 0.5).abs() < 1e-6);

        m.update(0.3);
        assert_eq!(m.weight("Idle"), 0.0);
        assert_eq!(m.weight("Greeting"), 1.0);
        assert!(!m.is_running("Idle"));
    }

    #[test]
    fn test_stale_fade_is_hard_stopped() {
        let mut m = mixer();
        m.transition_to("Idle").unwrap();
        m.update(1.0);

        // Leave Idle fading out, then transition again mid-fade.
        m.transition_to("Angry").unwrap();
        m.update(0.1);
        assert!(m.weight("Idle") > 0.0);

        let angry_before = m.weight("Angry");
        m.transition_to("Greeting").unwrap();
        // Idle was neither active nor target: gone immediately.
        assert_eq!(m.weight("Idle"), 0.0);
        // Angry was the active clip: it fades out from its current weight
        // rather than snapping off (or up).
        assert!((m.weight("Angry") - angry_before).abs() < 1e-6);
    }

    #[test]
    fn test_transition_to_active_clip_is_noop() {
        let mut m = mixer();
        m.transition_to("Idle").unwrap();
        m.update(0.3);
        let before = m.weight("Idle");

        m.transition_to("Idle").unwrap();
        assert_eq!(m.weight("Idle"), before, "no rewind on self-transition");
    }

    #[test]
    fn test_target_restarts_from_time_zero() {
        let mut m = mixer();
        m.transition_to("Idle").unwrap();
        m.update(1.5);
        m.transition_to("Angry").unwrap();
        m.update(1.0);

        // Back to Idle: it must fade in again from zero weight.
        m.transition_to("Idle").unwrap();
        assert_eq!(m.weight("Idle"), 0.0);
        m.update(0.25);
        assert!((m.weight("Idle") - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_clip_rejected() {
        let mut m = mixer();
        assert!(matches!(
            m.transition_to("Moonwalk"),
            Err(ClipError::UnknownClip(_))
        ));
    }

    #[test]
    fn test_local_clock_loops() {
        let mut m = mixer();
        m.transition_to("Idle").unwrap();
        // Clip duration is 2.0; run well past it and make sure sampling
        // still produces a pose (local time wrapped rather than clamping).
        for _ in 0..50 {
            m.update(0.1);
        }
        let pose = m.blended_pose();
        assert!(pose.contains_key("Spine"));
    }

    #[test]
    fn test_blended_pose_sweeps_during_crossfade() {
        let mut m = mixer();
        m.transition_to("Idle").unwrap();
        m.update(1.0);
        m.transition_to("Angry").unwrap();
        m.update(0.25);

        // Halfway through the fade the spine should sit between the two
        // clips' fixed poses.
        let pose = m.blended_pose();
        let spine = pose["Spine"];
        let halfway = Quat::from_rotation_y(FRAC_PI_2 / 2.0);
        assert!(
            spine.angle_between(halfway) < 0.05,
            "expected ~45 degrees, angle off by {}",
            spine.angle_between(halfway)
        );
    }
}
