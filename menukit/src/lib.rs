//! # menukit
//!
//! A stack-based navigation engine for nested text menus.
//!
//! Menus are plain nested mappings (`label -> submenu | action id`) parsed
//! once into a [`MenuNode`] tree. A [`MenuEngine`] walks the tree
//! interactively: numbered selection descends, `b` pops back up, `q` ends
//! the session, and selecting a leaf dispatches its action id through an
//! externally built [`ActionRegistry`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::io::{stdin, stdout};
//! use menukit::{ActionRegistry, MenuEngine, MenuNode};
//!
//! let raw = serde_json::json!({
//!     "Work": { "Study": "learn_x" },
//!     "Rest": "relax",
//! });
//! let root = MenuNode::build(&raw)?;
//!
//! let mut registry = ActionRegistry::new();
//! registry.register("relax", || {
//!     println!("resting...");
//!     Ok(())
//! });
//!
//! let mut engine = MenuEngine::new(&root, "Menu", &mut registry, stdin().lock(), stdout())?;
//! engine.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`node`] - Menu tree construction and traversal
//! - [`engine`] - Navigation and dispatch state machine
//! - [`registry`] - Action id to operation mapping
//! - [`error`] - Structural error types

/// Navigation and dispatch state machine.
pub mod engine;

/// Structural error types.
pub mod error;

/// Menu tree construction and traversal.
pub mod node;

/// Action id to operation mapping.
pub mod registry;

pub use engine::MenuEngine;
pub use error::MenuError;
pub use node::MenuNode;
pub use registry::{Action, ActionRegistry};
