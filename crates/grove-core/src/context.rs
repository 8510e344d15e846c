//! Per-request dispatch context

use crate::handler::ChainFn;
use crate::{Request, Response};
use grove_router::Params;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Mutable carrier for one request's trip through a handler chain
///
/// Holds the bound path parameters, a keyed scratch space handlers use
/// to pass values down the chain, and the chain cursor. Created by the
/// mux per matched request and dropped when dispatch returns; it is never
/// shared between requests.
pub struct Context<'a> {
    params: Params,
    state: HashMap<String, Box<dyn Any + Send + Sync>>,
    cursor: usize,
    links: &'a [ChainFn],
    pattern: &'a str,
}

impl<'a> Context<'a> {
    pub(crate) fn new(params: Params, links: &'a [ChainFn], pattern: &'a str) -> Self {
        Self {
            params,
            state: HashMap::new(),
            cursor: 0,
            links,
            pattern,
        }
    }

    /// Path parameters; a wildcard remainder is bound to `*`
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Shorthand for `params().get(name)`
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Normalized pattern of the matched route, e.g. `/users/{id}/`
    pub fn pattern(&self) -> &'a str {
        self.pattern
    }

    /// Store a scratch value for later handlers
    pub fn set<T>(&mut self, key: impl Into<String>, value: T) -> &mut Self
    where
        T: Any + Send + Sync,
    {
        self.state.insert(key.into(), Box::new(value));
        self
    }

    /// Scratch value stored under `key`, if it has type `T`
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.state.get(key)?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.state.get_mut(key)?.downcast_mut()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Box<dyn Any + Send + Sync>> {
        self.state.remove(key)
    }

    /// Scratch keys currently set, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }

    /// Handlers left after the one currently running
    pub fn remaining(&self) -> usize {
        self.links.len().saturating_sub(self.cursor + 1)
    }

    /// Invoke the next handler in the chain, if there is one
    ///
    /// Calling this from the last handler does nothing.
    pub fn next(&mut self, res: &mut Response, req: &Request) {
        self.cursor += 1;
        let links = self.links;
        if let Some(link) = links.get(self.cursor) {
            link(res, req, self);
        }
    }

    /// Run the chain from its first handler
    pub(crate) fn start(&mut self, res: &mut Response, req: &Request) {
        self.cursor = 0;
        let links = self.links;
        if let Some(link) = links.first() {
            link(res, req, self);
        }
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .field("state", &self.state.keys().collect::<Vec<_>>())
            .field("cursor", &self.cursor)
            .field("chain", &self.links.len())
            .finish()
    }
}
