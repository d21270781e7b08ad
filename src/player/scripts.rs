//! Script asset resolution

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::AssetConfig;
use crate::error::{PlayerError, Result};

/// Resolved asset pair for one script.
#[derive(Debug, Clone)]
pub struct ScriptAssets {
    /// `<audio_dir>/<script>.mp3`
    pub audio: PathBuf,
    /// `<audio_dir>/<script>.json`
    pub timeline: PathBuf,
}

/// Resolves script names to their audio/timeline file pairs.
///
/// A script exists when both `<name>.mp3` and `<name>.json` are present in
/// the audio directory; half-pairs are logged and skipped.
#[derive(Debug)]
pub struct ScriptLibrary {
    base_dir: PathBuf,
    scripts: HashMap<String, ScriptAssets>,
}

impl ScriptLibrary {
    /// Scan the configured audio directory for script asset pairs.
    pub fn new(config: &AssetConfig) -> Result<Self> {
        let base_dir = if config.audio_dir.is_absolute() {
            config.audio_dir.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&config.audio_dir)
        };

        let mut library = Self {
            base_dir,
            scripts: HashMap::new(),
        };
        library.scan()?;
        Ok(library)
    }

    fn scan(&mut self) -> Result<()> {
        self.scripts.clear();

        if !self.base_dir.exists() {
            tracing::warn!("Audio directory does not exist: {}", self.base_dir.display());
            return Ok(());
        }

        for entry in std::fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("mp3") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let timeline = path.with_extension("json");
            if timeline.exists() {
                tracing::debug!("Found script: {}", name);
                self.scripts.insert(
                    name.to_string(),
                    ScriptAssets {
                        audio: path.clone(),
                        timeline,
                    },
                );
            } else {
                tracing::warn!(
                    "Script {} has audio but no timeline: {}",
                    name,
                    timeline.display()
                );
            }
        }

        Ok(())
    }

    /// Look up a script's asset pair.
    pub fn get(&self, name: &str) -> Result<&ScriptAssets> {
        self.scripts
            .get(name)
            .ok_or_else(|| PlayerError::ScriptNotFound(name.to_string()).into())
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    /// Available script names, sorted for stable listing.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scripts.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Rescan the audio directory.
    pub fn reload(&mut self) -> Result<()> {
        self.scan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_scripts() -> (TempDir, AssetConfig) {
        let dir = TempDir::new().unwrap();

        std::fs::write(dir.path().join("welcome.mp3"), b"fake mp3 data").unwrap();
        std::fs::write(
            dir.path().join("welcome.json"),
            br#"{ "mouthCues": [] }"#,
        )
        .unwrap();
        // Audio without a timeline: must be skipped
        std::fs::write(dir.path().join("orphan.mp3"), b"fake mp3 data").unwrap();

        let config = AssetConfig {
            audio_dir: dir.path().to_path_buf(),
            default_script: "welcome".to_string(),
        };

        (dir, config)
    }

    #[test]
    fn test_scan_pairs() {
        let (_dir, config) = create_test_scripts();
        let library = ScriptLibrary::new(&config).unwrap();

        assert!(library.has_script("welcome"));
        assert!(!library.has_script("orphan"));
        assert_eq!(library.names(), vec!["welcome"]);
    }

    #[test]
    fn test_get_resolves_both_paths() {
        let (_dir, config) = create_test_scripts();
        let library = ScriptLibrary::new(&config).unwrap();

        let assets = library.get("welcome").unwrap();
        assert!(assets.audio.ends_with("welcome.mp3"));
        assert!(assets.timeline.ends_with("welcome.json"));
    }

    #[test]
    fn test_unknown_script_errors() {
        let (_dir, config) = create_test_scripts();
        let library = ScriptLibrary::new(&config).unwrap();
        assert!(library.get("missing").is_err());
    }

    #[test]
    fn test_missing_directory_yields_empty_library() {
        let config = AssetConfig {
            audio_dir: PathBuf::from("/nonexistent/audios"),
            default_script: "welcome".to_string(),
        };
        let library = ScriptLibrary::new(&config).unwrap();
        assert!(library.names().is_empty());
    }
}
