//! Builtin actions and registry assembly.
//!
//! `actions.json` maps the action ids used in `menu.json` to builtin names.
//! The registry is assembled statically here: every builtin name resolves
//! to a closure over the application context, so by the time the menu
//! starts, dispatch is a plain map lookup. An entry naming an unknown
//! builtin is a configuration error caught before the menu runs.

use std::{collections::HashMap, path::PathBuf};

use anyhow::{Context, Result, bail};
use log::debug;
use menukit::ActionRegistry;

use crate::{config::AppConfig, finder, notes, opener, paths::Paths};

/// Builtin names accepted in `actions.json`.
pub const BUILTINS: &[&str] = &[
    "create_topic",
    "list_topics",
    "create_law_note",
    "list_law_notes",
    "open_url",
    "open_homepage",
    "find_files",
];

const DEFAULT_HOMEPAGE: &str = "https://google.com";

/// Whether `name` is a known builtin.
pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Assemble the action registry from the `action id -> builtin` mapping.
///
/// # Errors
///
/// Returns an error when a mapping entry names an unknown builtin or when
/// a builtin needs a storage directory that is not configured.
pub fn build_registry(
    action_map: &HashMap<String, String>,
    paths: &Paths,
    config: &AppConfig,
) -> Result<ActionRegistry> {
    let topic_dir = storage_dir(paths, "topic")?;
    let law_dir = storage_dir(paths, "law")?;
    let homepage = config
        .homepage
        .clone()
        .unwrap_or_else(|| DEFAULT_HOMEPAGE.to_string());

    let mut registry = ActionRegistry::new();
    for (id, builtin) in action_map {
        match builtin.as_str() {
            "create_topic" => {
                let dir = topic_dir.clone();
                registry.register(id, move || notes::create_topic(&dir));
            }
            "list_topics" => {
                let dir = topic_dir.clone();
                registry.register(id, move || notes::list_notes(&dir, "_topic.md"));
            }
            "create_law_note" => {
                let dir = law_dir.clone();
                registry.register(id, move || notes::create_law_note(&dir));
            }
            "list_law_notes" => {
                let dir = law_dir.clone();
                registry.register(id, move || notes::list_notes(&dir, "_law.md"));
            }
            "open_url" => {
                registry.register(id, opener::open_prompted_url);
            }
            "open_homepage" => {
                let link = homepage.clone();
                registry.register(id, move || opener::open_checked(&link));
            }
            "find_files" => {
                registry.register(id, || finder::find_files(std::path::Path::new(".")));
            }
            other => bail!("unknown builtin action `{other}` for id `{id}`"),
        }
    }

    debug!("registered {} actions", registry.len());
    Ok(registry)
}

fn storage_dir(paths: &Paths, key: &str) -> Result<PathBuf> {
    paths
        .storage(key)
        .map(PathBuf::from)
        .with_context(|| format!("no storage directory configured for `{key}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(id, builtin)| ((*id).to_string(), (*builtin).to_string()))
            .collect()
    }

    #[test]
    fn test_build_registry_covers_all_builtins() {
        let map = action_map(&[
            ("topic", "create_topic"),
            ("topics_list", "list_topics"),
            ("law", "create_law_note"),
            ("law_list", "list_law_notes"),
            ("page", "open_url"),
            ("homepage", "open_homepage"),
            ("find", "find_files"),
        ]);
        let paths = Paths::new("/tmp/base");
        let registry = build_registry(&map, &paths, &AppConfig::default()).unwrap();
        assert_eq!(registry.len(), 7);
        assert!(registry.contains("homepage"));
    }

    #[test]
    fn test_unknown_builtin_is_a_configuration_error() {
        let map = action_map(&[("boom", "make_coffee")]);
        let paths = Paths::new("/tmp/base");
        let err = build_registry(&map, &paths, &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("make_coffee"));
    }

    #[test]
    fn test_is_builtin() {
        assert!(is_builtin("create_topic"));
        assert!(!is_builtin("getattr"));
    }
}
