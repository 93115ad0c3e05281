//! Path management.
//!
//! Resolves the configuration directory and the storage directories for
//! generated notes. Storage locations have built-in defaults and can be
//! overridden per key through `config.json`; relative overrides are joined
//! onto the base directory.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use crate::config::AppConfig;

/// Default storage locations, keyed the same way as `config.json` entries.
const DEFAULT_STORAGE: &[(&str, &str)] = &[("topic", "Storage/Topics"), ("law", "Storage/Law")];

/// Resolved application paths.
#[derive(Debug, Clone)]
pub struct Paths {
    base: PathBuf,
    config_dir: PathBuf,
    storage: HashMap<String, PathBuf>,
}

impl Paths {
    /// Build paths rooted at `base` with default storage locations.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let storage = DEFAULT_STORAGE
            .iter()
            .map(|(key, dir)| ((*key).to_string(), base.join(dir)))
            .collect();
        Self {
            config_dir: base.join("configs"),
            base,
            storage,
        }
    }

    /// Apply storage overrides from the loaded configuration.
    pub fn apply_config(&mut self, config: &AppConfig) {
        for (key, dir) in &config.paths {
            let path = PathBuf::from(dir);
            let resolved = if path.is_absolute() {
                path
            } else {
                self.base.join(path)
            };
            self.storage.insert(key.clone(), resolved);
        }
    }

    /// The configuration directory.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path to `menu.json`.
    pub fn menu_file(&self) -> PathBuf {
        self.config_dir.join("menu.json")
    }

    /// Path to `actions.json`.
    pub fn actions_file(&self) -> PathBuf {
        self.config_dir.join("actions.json")
    }

    /// Path to `config.json`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Storage directory for a given key, if known.
    pub fn storage(&self, key: &str) -> Option<&Path> {
        self.storage.get(key).map(PathBuf::as_path)
    }

    /// Create every storage directory that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns the first directory-creation failure.
    pub fn ensure_storage_dirs(&self) -> io::Result<()> {
        for dir in self.storage.values() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
