use thiserror::Error;

/// Errors raised while building or traversing a menu tree.
///
/// Both variants are construction-time conditions: a running engine never
/// produces them for valid trees. A leaf whose action id has no registry
/// entry is deliberately *not* an error (see [`crate::engine::MenuEngine`]).
#[derive(Debug, Error)]
pub enum MenuError {
    /// The raw configuration cannot form a valid menu tree.
    #[error("malformed menu at `{path}`: {reason}")]
    Malformed {
        /// Dot-separated path to the offending entry.
        path: String,
        /// Human-readable description of the defect.
        reason: String,
    },
    /// A children query was issued against an action leaf.
    #[error("action leaves have no children")]
    InvalidNode,
}
