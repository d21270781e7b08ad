//! Animation selection state

use serde::{Deserialize, Serialize};

/// The three skeletal clips the avatar can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationName {
    /// Default in-place loop
    Idle,
    Angry,
    Greeting,
}

impl Default for AnimationName {
    fn default() -> Self {
        Self::Idle
    }
}

impl AnimationName {
    pub const ALL: [AnimationName; 3] = [Self::Idle, Self::Angry, Self::Greeting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Angry => "Angry",
            Self::Greeting => "Greeting",
        }
    }
}

impl std::fmt::Display for AnimationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(AnimationName::default(), AnimationName::Idle);
    }

    #[test]
    fn test_names_match_clip_names() {
        let names: Vec<&str> = AnimationName::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(names, vec!["Idle", "Angry", "Greeting"]);
    }
}
