//! Morph-target weight storage for a single mesh

use std::collections::HashMap;

/// A mesh's morph-target channels: a name→index dictionary plus the weight
/// array it indexes into.
///
/// Mirrors how a skinned mesh exposes its targets: two meshes (head, teeth)
/// share a naming scheme but own independent dictionaries and weights. A mesh
/// without a facial rig simply has an empty dictionary; every write to it is a
/// silent no-op.
#[derive(Debug, Clone)]
pub struct MorphMesh {
    name: String,
    dictionary: HashMap<String, usize>,
    weights: Vec<f32>,
}

impl MorphMesh {
    /// Create a mesh exposing the given channels, all weights starting at 0.
    pub fn new<I, S>(name: &str, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dictionary = HashMap::new();
        for channel in channels {
            let channel = channel.into();
            let next = dictionary.len();
            dictionary.entry(channel).or_insert(next);
        }
        let weights = vec![0.0; dictionary.len()];

        Self {
            name: name.to_string(),
            dictionary,
            weights,
        }
    }

    /// Create a mesh with no facial rig at all.
    pub fn unrigged(name: &str) -> Self {
        Self {
            name: name.to_string(),
            dictionary: HashMap::new(),
            weights: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this mesh carries any morph targets.
    pub fn has_morph_targets(&self) -> bool {
        !self.dictionary.is_empty()
    }

    /// Set a channel's weight by name. Absent channels are skipped silently.
    pub fn set_weight(&mut self, channel: &str, weight: f32) {
        if let Some(&index) = self.dictionary.get(channel) {
            self.weights[index] = weight.clamp(0.0, 1.0);
        }
    }

    /// Read a channel's weight by name, if the channel exists.
    pub fn weight(&self, channel: &str) -> Option<f32> {
        self.dictionary.get(channel).map(|&index| self.weights[index])
    }

    /// Raw weight array, indexed per the dictionary.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Channel names this mesh exposes.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.dictionary.keys().map(|s| s.as_str())
    }
}
