//! Menu tree representation.
//!
//! A menu is a labeled tree: interior nodes map labels to submenus, leaves
//! map a label to an opaque action id resolved later against an
//! [`ActionRegistry`](crate::registry::ActionRegistry). The tree is built
//! once from raw nested JSON data and is read-only afterwards.

use serde_json::Value;

use crate::error::MenuError;

/// One node of the menu tree.
///
/// The variant is determined structurally from the configuration: a mapping
/// becomes [`MenuNode::Interior`], a string becomes [`MenuNode::Leaf`]
/// wrapping the string as an action id. Child order is the source mapping's
/// insertion order and defines the numbering shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuNode {
    /// Submenu with ordered labeled children.
    Interior(Vec<(String, MenuNode)>),
    /// Action leaf holding an action id.
    Leaf(String),
}

impl MenuNode {
    /// Build a menu tree from raw nested configuration data.
    ///
    /// The root value must be a mapping. Labels and action ids are stored
    /// trimmed; a label that is empty after trimming, an empty action id,
    /// a value that is neither a mapping nor a string, or two labels that
    /// collide after trimming all fail the build. A leaf whose action id
    /// has no registered implementation is valid configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Malformed`] with the dot-separated path to the
    /// first offending entry.
    pub fn build(raw: &Value) -> Result<Self, MenuError> {
        let Value::Object(map) = raw else {
            return Err(MenuError::Malformed {
                path: "<root>".into(),
                reason: format!("menu root must be a mapping, got {}", value_kind(raw)),
            });
        };
        Self::build_interior(map, &mut Vec::new())
    }

    fn build_interior(
        map: &serde_json::Map<String, Value>,
        path: &mut Vec<String>,
    ) -> Result<Self, MenuError> {
        let mut children: Vec<(String, MenuNode)> = Vec::with_capacity(map.len());

        for (key, value) in map {
            let label = key.trim();
            if label.is_empty() {
                return Err(malformed(path, "empty menu label"));
            }
            // Labels may collide only after trimming: a raw JSON mapping
            // cannot carry the same key twice.
            if children.iter().any(|(seen, _)| seen == label) {
                return Err(malformed(path, &format!("duplicate menu label `{label}`")));
            }

            path.push(label.to_string());
            let child = match value {
                Value::Object(sub) => Self::build_interior(sub, path)?,
                Value::String(id) => {
                    let id = id.trim();
                    if id.is_empty() {
                        return Err(malformed(path, "empty action id"));
                    }
                    MenuNode::Leaf(id.to_string())
                }
                other => {
                    return Err(malformed(
                        path,
                        &format!("expected submenu or action id, got {}", value_kind(other)),
                    ));
                }
            };
            path.pop();

            children.push((label.to_string(), child));
        }

        Ok(MenuNode::Interior(children))
    }

    /// Ordered immediate children of an interior node.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::InvalidNode`] when called on a leaf.
    pub fn children(&self) -> Result<&[(String, MenuNode)], MenuError> {
        match self {
            MenuNode::Interior(children) => Ok(children),
            MenuNode::Leaf(_) => Err(MenuError::InvalidNode),
        }
    }

    /// Whether this node is a submenu.
    pub fn is_interior(&self) -> bool {
        matches!(self, MenuNode::Interior(_))
    }

    /// The action id of a leaf, if this node is one.
    pub fn action_id(&self) -> Option<&str> {
        match self {
            MenuNode::Leaf(id) => Some(id),
            MenuNode::Interior(_) => None,
        }
    }

    /// Every action id reachable from this node, in display order.
    ///
    /// Used by callers to cross-check a menu against the registered actions.
    pub fn action_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_action_ids(&mut ids);
        ids
    }

    fn collect_action_ids<'a>(&'a self, acc: &mut Vec<&'a str>) {
        match self {
            MenuNode::Leaf(id) => acc.push(id),
            MenuNode::Interior(children) => {
                for (_, child) in children {
                    child.collect_action_ids(acc);
                }
            }
        }
    }
}

fn malformed(path: &[String], reason: &str) -> MenuError {
    MenuError::Malformed {
        path: if path.is_empty() {
            "<root>".into()
        } else {
            path.join(".")
        },
        reason: reason.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
