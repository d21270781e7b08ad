//! Viseme-driven lip sync: timeline data and the per-frame morph driver

pub mod driver;
pub mod timeline;
pub mod viseme;

pub use driver::apply_visemes;
pub use timeline::{Cue, Timeline};
pub use viseme::Viseme;
