//! Action registry.
//!
//! Maps opaque action ids appearing in menu leaves to runnable operations.
//! The registry is built by the application before the engine starts; the
//! engine only performs lookups. An id referenced by the menu but absent
//! here is valid configuration, surfaced at dispatch time as a stub notice.

use std::{collections::HashMap, fmt};

/// A zero-argument operation invoked when its leaf is selected.
///
/// Failures returned by an action propagate out of the engine's run loop
/// unchanged; the engine does not recover from them.
pub type Action = Box<dyn FnMut() -> anyhow::Result<()>>;

/// Mapping from action id to runnable operation.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Action>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under an action id.
    ///
    /// A later registration under the same id replaces the earlier one.
    pub fn register<F>(&mut self, id: impl Into<String>, action: F)
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.actions.insert(id.into(), Box::new(action));
    }

    /// Whether an operation is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Action> {
        self.actions.get_mut(id)
    }

    /// Iterate over the registered action ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the registry holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Actions are opaque closures; the ids are the useful part.
        let mut ids: Vec<&str> = self.ids().collect();
        ids.sort_unstable();
        f.debug_struct("ActionRegistry").field("ids", &ids).finish()
    }
}
