//! Route insertion errors

use thiserror::Error;

/// Why a pattern could not be inserted into a [`Tree`](crate::Tree)
///
/// Patterns are reported in normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// A route already terminates at this node
    #[error("route {pattern} already exists")]
    DuplicateRoute { pattern: String },

    /// A wildcard token appeared before the final position
    #[error("wildcard (*) must be the last token of {pattern}")]
    WildcardNotTerminal { pattern: String },

    /// A different parameter name already owns this position
    /// (only under [`ParamNames::Reject`](crate::ParamNames::Reject))
    #[error("parameter {{{name}}} in {pattern} conflicts with {{{existing}}}")]
    ConflictingParam {
        pattern: String,
        existing: String,
        name: String,
    },
}
