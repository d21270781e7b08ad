//! The closed viseme set and its morph-target channel mapping

use serde::{Deserialize, Serialize};

/// A canonical mouth-shape code produced by phoneme analysis.
///
/// The set is closed: timeline documents may only use these nine letter codes,
/// and parsing anything else fails at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Viseme {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    /// Rest/silence shape
    X,
}

impl Viseme {
    pub const ALL: [Viseme; 9] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::X,
    ];

    /// The morph-target channel this viseme drives.
    ///
    /// Total over the enum; `A` and `X` intentionally share a channel
    /// (rest and closed-lips use the same mouth shape).
    pub fn morph_target(&self) -> &'static str {
        match self {
            Self::A => "viseme_PP",
            Self::B => "viseme_kk",
            Self::C => "viseme_I",
            Self::D => "viseme_AA",
            Self::E => "viseme_O",
            Self::F => "viseme_U",
            Self::G => "viseme_FF",
            Self::H => "viseme_TH",
            Self::X => "viseme_PP",
        }
    }

    /// Every distinct morph-target channel the viseme set can touch.
    ///
    /// This is the reset set: a frame starts by zeroing exactly these channels.
    pub fn channels() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|v| v.morph_target())
    }
}

impl std::fmt::Display for Viseme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
            Self::X => "X",
        };
        write!(f, "{}", code)
    }
}
