//! grove-router: per-verb route trie and path matcher
//!
//! The routing engine behind grove-core. It stores route patterns in a
//! prefix tree and walks incoming paths against it. The value stored at a
//! terminal node is generic, so this crate knows nothing about handlers.
//!
//! ## Pattern Syntax
//! - `users` - Static segment (matched exactly)
//! - `{id}` - Named parameter (captures one segment)
//! - `*` - Wildcard (captures the remaining path, must be last)
//!
//! A trailing `/` is always implied and duplicate `/` collapse, on both
//! patterns and request paths.
//!
//! ## Priority
//! 1. Exact static match (highest)
//! 2. Parameter match
//! 3. Wildcard match (lowest); among wildcards the deepest wins
//!
//! Wildcards never match an empty remainder, except that `/*` matches `/`
//! when no root route exists.
//!
//! ## Example
//! ```
//! use grove_router::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert("/users", 0).unwrap();
//! tree.insert("/users/{id}", 1).unwrap();
//! tree.insert("/files/*", 2).unwrap();
//!
//! let m = tree.find("/users/123").unwrap();
//! assert_eq!(*m.value, 1);
//! assert_eq!(m.params.get("id"), Some("123"));
//!
//! let m = tree.find("/files/css/site.css").unwrap();
//! assert_eq!(m.params.get("*"), Some("css/site.css"));
//! ```
//!
//! A tree is built once and then only read. Lookups take `&self` and are
//! safe to run from many threads; inserting after serving has begun needs
//! outside synchronization.

mod error;
mod params;
mod pattern;
mod tree;

pub use error::InsertError;
pub use params::{Params, MAX_INLINE_PARAMS, WILDCARD_PARAM};
pub use pattern::{normalize, segments, Pattern, Token, SEPARATOR, WILDCARD};
pub use tree::{Match, ParamNames, Tree};
