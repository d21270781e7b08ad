//! Skeletal animation clips: keyframe tracks, normalization, and sampling

use glam::{Quat, Vec3};
use std::collections::HashMap;

use crate::error::ClipError;

/// Which bone property a track animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackProperty {
    Position,
    Rotation,
}

/// Keyframe values for one track.
#[derive(Debug, Clone)]
pub enum TrackValues {
    Position(Vec<Vec3>),
    Rotation(Vec<Quat>),
}

/// One keyframe channel targeting `<bone>.<property>`.
#[derive(Debug, Clone)]
pub struct Track {
    pub bone: String,
    pub property: TrackProperty,
    /// Keyframe times in seconds, ascending
    pub times: Vec<f32>,
    pub values: TrackValues,
}

impl Track {
    pub fn rotation(bone: &str, times: Vec<f32>, values: Vec<Quat>) -> Self {
        Self {
            bone: bone.to_string(),
            property: TrackProperty::Rotation,
            times,
            values: TrackValues::Rotation(values),
        }
    }

    pub fn position(bone: &str, times: Vec<f32>, values: Vec<Vec3>) -> Self {
        Self {
            bone: bone.to_string(),
            property: TrackProperty::Position,
            times,
            values: TrackValues::Position(values),
        }
    }

    /// Index of the keyframe segment containing `t`, plus the blend factor
    /// within it. Clamps outside the keyframe range.
    fn segment(&self, t: f32) -> (usize, f32) {
        let times = &self.times;
        if t <= times[0] {
            return (0, 0.0);
        }
        let last = times.len() - 1;
        if t >= times[last] {
            return (last.saturating_sub(1), 1.0);
        }

        let mut i = 0;
        while i + 1 < times.len() && times[i + 1] < t {
            i += 1;
        }
        let span = times[i + 1] - times[i];
        let alpha = if span > 0.0 { (t - times[i]) / span } else { 0.0 };
        (i, alpha)
    }

    /// Sample a rotation track at time `t` (slerp between keyframes).
    pub fn sample_rotation(&self, t: f32) -> Option<Quat> {
        let TrackValues::Rotation(ref values) = self.values else {
            return None;
        };
        if values.len() == 1 {
            return Some(values[0]);
        }
        let (i, alpha) = self.segment(t);
        Some(values[i].slerp(values[i + 1], alpha))
    }
}

/// A named skeletal pose track set, normalized at load time.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub tracks: Vec<Track>,
}

/// Bone-name prefix stamped on every track by the animation exporter.
const BONE_PREFIX: &str = "mixamorig";

/// Root bone whose translation tracks encode locomotion.
const ROOT_BONE: &str = "Hips";

impl AnimationClip {
    /// Build a clip from raw tracks, applying both normalization steps:
    /// the exporter's bone-name prefix is stripped (case-insensitive), and
    /// root-bone translation tracks are discarded so in-place loops do not
    /// drift the character.
    pub fn new(name: &str, tracks: Vec<Track>) -> Result<Self, ClipError> {
        for track in &tracks {
            if track.times.is_empty() {
                return Err(ClipError::EmptyTrack {
                    track: format!("{}.{:?}", track.bone, track.property),
                });
            }
        }

        let tracks: Vec<Track> = tracks
            .into_iter()
            .map(strip_bone_prefix)
            .filter(|t| !(t.bone == ROOT_BONE && t.property == TrackProperty::Position))
            .collect();

        if tracks.is_empty() {
            return Err(ClipError::Empty(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            tracks,
        })
    }

    /// Clip length in seconds: the latest keyframe across all tracks.
    pub fn duration(&self) -> f32 {
        self.tracks
            .iter()
            .filter_map(|t| t.times.last().copied())
            .fold(0.0, f32::max)
    }

    /// Sample every rotation track at local clip time `t`.
    pub fn sample_pose(&self, t: f32) -> HashMap<String, Quat> {
        let mut pose = HashMap::new();
        for track in &self.tracks {
            if let Some(rotation) = track.sample_rotation(t) {
                pose.insert(track.bone.clone(), rotation);
            }
        }
        pose
    }
}

fn strip_bone_prefix(mut track: Track) -> Track {
    if track.bone.len() >= BONE_PREFIX.len()
        && track.bone[..BONE_PREFIX.len()].eq_ignore_ascii_case(BONE_PREFIX)
    {
        track.bone = track.bone[BONE_PREFIX.len()..].to_string();
    }
    track
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn spin_track(bone: &str) -> Track {
        Track::rotation(
            bone,
            vec![0.0, 1.0, 2.0],
            vec![
                Quat::IDENTITY,
                Quat::from_rotation_y(FRAC_PI_2),
                Quat::from_rotation_y(FRAC_PI_2 * 2.0),
            ],
        )
    }

    #[test]
    fn test_prefix_stripped_case_insensitive() {
        let clip = AnimationClip::new(
            "Idle",
            vec![spin_track("mixamorigSpine"), spin_track("MixamorigHead")],
        )
        .unwrap();

        let bones: Vec<&str> = clip.tracks.iter().map(|t| t.bone.as_str()).collect();
        assert_eq!(bones, vec!["Spine", "Head"]);
    }

    #[test]
    fn test_root_translation_removed() {
        let clip = AnimationClip::new(
            "Greeting",
            vec![
                Track::position(
                    "mixamorigHips",
                    vec![0.0, 1.0],
                    vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)],
                ),
                spin_track("mixamorigHips"),
            ],
        )
        .unwrap();

        // Rotation survives, locomotion does not.
        assert_eq!(clip.tracks.len(), 1);
        assert_eq!(clip.tracks[0].property, TrackProperty::Rotation);
        assert_eq!(clip.tracks[0].bone, "Hips");
    }

    #[test]
    fn test_clip_of_only_root_translation_is_empty() {
        let result = AnimationClip::new(
            "Broken",
            vec![Track::position(
                "mixamorigHips",
                vec![0.0],
                vec![Vec3::ZERO],
            )],
        );
        assert!(matches!(result, Err(ClipError::Empty(_))));
    }

    #[test]
    fn test_duration_is_latest_keyframe() {
        let clip = AnimationClip::new("Idle", vec![spin_track("Spine")]).unwrap();
        assert_eq!(clip.duration(), 2.0);
    }

    #[test]
    fn test_sample_interpolates_between_keyframes() {
        let clip = AnimationClip::new("Idle", vec![spin_track("Spine")]).unwrap();

        let pose = clip.sample_pose(0.5);
        let expected = Quat::IDENTITY.slerp(Quat::from_rotation_y(FRAC_PI_2), 0.5);
        let got = pose["Spine"];
        assert!(got.angle_between(expected) < 1e-5, "got {:?}", got);
    }

    #[test]
    fn test_sample_clamps_outside_range() {
        let clip = AnimationClip::new("Idle", vec![spin_track("Spine")]).unwrap();

        let before = clip.sample_pose(-1.0)["Spine"];
        assert!(before.angle_between(Quat::IDENTITY) < 1e-5);

        let after = clip.sample_pose(10.0)["Spine"];
        assert!(after.angle_between(Quat::from_rotation_y(FRAC_PI_2 * 2.0)) < 1e-5);
    }

    #[test]
    fn test_empty_track_rejected() {
        let result = AnimationClip::new(
            "Idle",
            vec![Track::rotation("Spine", vec![], vec![])],
        );
        assert!(matches!(result, Err(ClipError::EmptyTrack { .. })));
    }
}
