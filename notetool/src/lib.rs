//! # notetool
//!
//! A personal productivity CLI built around a navigable text menu.
//!
//! `notetool` generates templated markdown notes and triggers small system
//! helpers (URL opener, file finder) through a nested menu defined in
//! `configs/menu.json`. The menu itself is driven by the [`menukit`]
//! engine; this crate supplies the configuration loading, the action
//! implementations, and the terminal dressing around it.
//!
//! ## Modules
//!
//! - [`actions`] - Builtin actions and registry assembly
//! - [`config`] - Configuration file loading and defaults
//! - [`finder`] - File search by name fragment
//! - [`notes`] - Markdown note templates
//! - [`opener`] - Platform file/URL launcher
//! - [`paths`] - Path management
//! - [`term`] - Terminal glue

/// Builtin actions and registry assembly.
pub mod actions;

/// Configuration file loading and defaults.
pub mod config;

/// File search by name fragment.
pub mod finder;

/// Markdown note templates.
pub mod notes;

/// Platform file/URL launcher.
pub mod opener;

/// Path management.
pub mod paths;

/// Terminal glue: clearing, panels, prompts.
pub mod term;
