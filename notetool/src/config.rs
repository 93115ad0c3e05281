//! Configuration file loading.
//!
//! Three JSON files under `configs/` drive the application:
//!
//! - `menu.json` - nested `label -> (submenu | action id)` mapping handed
//!   to [`menukit::MenuNode::build`]
//! - `actions.json` - flat `action id -> builtin name` mapping used to
//!   assemble the action registry
//! - `config.json` - optional storage-path overrides and the homepage URL
//!
//! `notetool init` writes the default versions of all three.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;

use crate::paths::Paths;

/// Optional settings from `config.json`.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Storage directory overrides, keyed by storage name.
    #[serde(default)]
    pub paths: HashMap<String, String>,
    /// URL opened by the `open_homepage` builtin.
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Load `config.json`; a missing file yields the defaults.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load_app_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Load the raw menu structure from `menu.json`.
///
/// # Errors
///
/// Returns an error when the file is missing, unreadable, or not JSON.
pub fn load_menu(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path).with_context(|| {
        format!(
            "failed to read {} (run `notetool init` to create it)",
            path.display()
        )
    })?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Load the `action id -> builtin name` mapping from `actions.json`.
///
/// # Errors
///
/// Returns an error when the file is missing, unreadable, or not a flat
/// string-to-string JSON mapping.
pub fn load_action_map(path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path).with_context(|| {
        format!(
            "failed to read {} (run `notetool init` to create it)",
            path.display()
        )
    })?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

const DEFAULT_MENU: &str = r#"{
    "Notes": {
        "New topic note": "topic",
        "Browse topic notes": "topics_list",
        "New law note": "law",
        "Browse law notes": "law_list"
    },
    "Browser": {
        "Open a page": "page",
        "Open homepage": "homepage"
    },
    "System": {
        "Find files by name": "find"
    }
}
"#;

const DEFAULT_ACTIONS: &str = r#"{
    "topic": "create_topic",
    "topics_list": "list_topics",
    "law": "create_law_note",
    "law_list": "list_law_notes",
    "page": "open_url",
    "homepage": "open_homepage",
    "find": "find_files"
}
"#;

const DEFAULT_CONFIG: &str = r#"{
    "paths": {
        "topic": "Storage/Topics",
        "law": "Storage/Law"
    },
    "homepage": "https://google.com"
}
"#;

/// Write the default configuration files, skipping ones that already exist.
///
/// # Errors
///
/// Returns the first directory-creation or write failure.
pub fn write_defaults(paths: &Paths) -> Result<()> {
    fs::create_dir_all(paths.config_dir())
        .with_context(|| format!("failed to create {}", paths.config_dir().display()))?;

    for (file, content) in [
        (paths.menu_file(), DEFAULT_MENU),
        (paths.actions_file(), DEFAULT_ACTIONS),
        (paths.config_file(), DEFAULT_CONFIG),
    ] {
        if file.exists() {
            info!("keeping existing {}", file.display());
            continue;
        }
        fs::write(&file, content).with_context(|| format!("failed to write {}", file.display()))?;
        println!("created {}", file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use menukit::MenuNode;

    #[test]
    fn test_default_menu_builds() {
        let raw: serde_json::Value = serde_json::from_str(DEFAULT_MENU).unwrap();
        let root = MenuNode::build(&raw).unwrap();
        assert_eq!(root.children().unwrap().len(), 3);
    }

    #[test]
    fn test_default_actions_cover_default_menu() {
        let raw: serde_json::Value = serde_json::from_str(DEFAULT_MENU).unwrap();
        let root = MenuNode::build(&raw).unwrap();
        let actions: HashMap<String, String> = serde_json::from_str(DEFAULT_ACTIONS).unwrap();
        for id in root.action_ids() {
            assert!(actions.contains_key(id), "unmapped action id `{id}`");
        }
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_app_config(&tmp.path().join("config.json")).unwrap();
        assert!(config.paths.is_empty());
        assert!(config.homepage.is_none());
    }

    #[test]
    fn test_write_defaults_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = Paths::new(tmp.path());
        write_defaults(&paths).unwrap();

        // A user edit must survive a second init.
        fs::write(paths.menu_file(), "{}").unwrap();
        write_defaults(&paths).unwrap();
        assert_eq!(fs::read_to_string(paths.menu_file()).unwrap(), "{}");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("config.json");
        fs::write(&file, "{ not json").unwrap();
        assert!(load_app_config(&file).is_err());
    }
}
