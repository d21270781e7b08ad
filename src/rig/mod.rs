//! Rig-side data: morph-target meshes, skeletal clips, and the clip mixer

pub mod clip;
pub mod mixer;
pub mod morph;

pub use clip::AnimationClip;
pub use mixer::AnimationMixer;
pub use morph::MorphMesh;
