//! Bound path parameters

use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Parameters stay inline up to this count
pub const MAX_INLINE_PARAMS: usize = 8;

/// Parameter name a wildcard remainder is bound to
pub const WILDCARD_PARAM: &str = "*";

/// Path parameters bound during a match, in binding order
///
/// Names are shared with the trie node that declared them. Lookups are
/// last-write-wins, so a pattern reusing a name reports the deepest value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>,
}

impl Params {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: Arc<str>, value: impl Into<String>) {
        self.inner.push((name, value.into()));
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }

    /// Value bound to `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Wildcard remainder, if a wildcard route matched
    pub fn wildcard(&self) -> Option<&str> {
        self.get(WILDCARD_PARAM)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// `(name, value)` pairs in binding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Copy into a map (allocates; prefer [`Params::get`] on hot paths)
    pub fn to_map(&self) -> HashMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
