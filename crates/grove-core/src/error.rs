//! Error types for grove-core

use crate::Method;
use grove_router::InsertError;
use thiserror::Error;

/// Result type alias for grove operations
pub type Result<T> = std::result::Result<T, Error>;

/// Registration and conversion errors
///
/// Registration never panics; every failure is returned from
/// [`Mux::on`](crate::Mux::on). Failing to match a request is not an
/// error, it produces a 404 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Verb is not one of the recognized methods nor `*`
    #[error("{0} isn't a valid HTTP verb")]
    InvalidVerb(String),

    /// Same verb and pattern registered twice
    #[error("{method} {pattern} exists, ignoring")]
    DuplicateRoute { method: Method, pattern: String },

    /// Wildcard token before the end of the pattern
    #[error("{method} {pattern} wildcard (*) token must be last")]
    WildcardNotTerminal { method: Method, pattern: String },

    /// Parameter name clashes with another at the same position
    #[error("{method} {pattern} parameter {{{name}}} conflicts with {{{existing}}}")]
    ConflictingParam {
        method: Method,
        pattern: String,
        existing: String,
        name: String,
    },

    /// A handler follows a terminal handler
    #[error("{verb} {pattern} has unreachable middleware")]
    UnreachableHandler { verb: String, pattern: String },

    /// Missing handler, or no handlers at all
    #[error("{verb} {pattern} has nil middleware")]
    NilHandler { verb: String, pattern: String },

    /// Value is neither a chainable nor a terminal handler
    #[error("{verb} {pattern} handler must be a chainable or terminal handler")]
    InvalidHandlerType { verb: String, pattern: String },

    /// Header cannot be carried by an `http::Response`
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl Error {
    pub(crate) fn from_insert(method: Method, err: InsertError) -> Self {
        match err {
            InsertError::DuplicateRoute { pattern } => Error::DuplicateRoute { method, pattern },
            InsertError::WildcardNotTerminal { pattern } => {
                Error::WildcardNotTerminal { method, pattern }
            }
            InsertError::ConflictingParam {
                pattern,
                existing,
                name,
            } => Error::ConflictingParam {
                method,
                pattern,
                existing,
                name,
            },
        }
    }

    /// Whether this error came from the route table rather than the
    /// handler list or verb
    pub fn is_route_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateRoute { .. }
                | Error::WildcardNotTerminal { .. }
                | Error::ConflictingParam { .. }
        )
    }
}
