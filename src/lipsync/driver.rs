//! Per-frame viseme driver: maps audio time to morph-target weights

use crate::lipsync::timeline::Timeline;
use crate::lipsync::viseme::Viseme;
use crate::rig::morph::MorphMesh;

/// Write this frame's viseme weights onto every given mesh.
///
/// Two passes, every frame:
/// 1. zero every channel the viseme set can touch, so no stale weight
///    survives a cue interval ending;
/// 2. scan the timeline in order and set weight 1 for every cue whose
///    `[start, end]` interval contains `audio_time` (inclusive both bounds).
///
/// The scan never early-exits, so when cues overlap the later cue in document
/// order wins. Weights are binary — mouth shapes are hard cuts, not blends.
/// Meshes without a facial rig are skipped entirely.
pub fn apply_visemes(timeline: &Timeline, audio_time: f64, meshes: &mut [&mut MorphMesh]) {
    for mesh in meshes.iter_mut() {
        if !mesh.has_morph_targets() {
            continue;
        }

        for channel in Viseme::channels() {
            mesh.set_weight(channel, 0.0);
        }

        for cue in &timeline.mouth_cues {
            if cue.contains(audio_time) {
                mesh.set_weight(cue.value.morph_target(), 1.0);
            }
        }
    }
}
