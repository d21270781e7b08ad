//! Lip-sync timeline: timestamped viseme cues for one audio clip

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TalkingHeadError, TimelineError};
use crate::lipsync::viseme::Viseme;

/// A timestamped interval asserting "this viseme is active".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Interval start in seconds
    pub start: f64,
    /// Interval end in seconds
    pub end: f64,
    /// Active mouth shape
    pub value: Viseme,
}

impl Cue {
    /// Whether `t` falls inside this cue, inclusive on both bounds.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }
}

/// Optional metadata block emitted by the lip-sync analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineMetadata {
    #[serde(default, rename = "soundFile")]
    pub sound_file: Option<String>,
    /// Duration of the analyzed audio clip in seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

/// An ordered cue sequence for one script, immutable once loaded.
///
/// Cues are kept in document order and are not required to be disjoint;
/// overlap policy (last cue wins) lives in the driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub metadata: TimelineMetadata,
    #[serde(rename = "mouthCues")]
    pub mouth_cues: Vec<Cue>,
}

impl Timeline {
    /// Load a timeline document from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TalkingHeadError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TimelineError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_json(&contents)
    }

    /// Parse a timeline document from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, TalkingHeadError> {
        let timeline: Self =
            serde_json::from_str(s).map_err(|e| TimelineError::Parse(e.to_string()))?;
        timeline.check_cues()?;
        Ok(timeline)
    }

    fn check_cues(&self) -> Result<(), TimelineError> {
        for (index, cue) in self.mouth_cues.iter().enumerate() {
            if cue.end < cue.start {
                return Err(TimelineError::InvertedCue {
                    index,
                    start: cue.start,
                    end: cue.end,
                });
            }
        }
        Ok(())
    }

    /// End time of the last cue, or 0 for an empty timeline.
    pub fn duration(&self) -> f64 {
        self.mouth_cues.iter().fold(0.0, |d, cue| d.max(cue.end))
    }

    /// Duration of the audio clip this timeline was analyzed from: the
    /// metadata value when present, otherwise the last cue's end.
    pub fn audio_duration(&self) -> f64 {
        self.metadata.duration.unwrap_or_else(|| self.duration())
    }

    pub fn is_empty(&self) -> bool {
        self.mouth_cues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mouth_cues.len()
    }
}
