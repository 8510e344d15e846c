//! Per-method route table
//!
//! One independent [`Tree`] per routable method, indexed by
//! [`Method::index`] for O(1) method dispatch.

use crate::{Error, Method, Result};
use grove_router::{Match, ParamNames, Tree};

/// HTTP router over an arbitrary route value
///
/// Routes are organized by HTTP method for O(1) method dispatch,
/// then matched against that method's trie.
#[derive(Debug)]
pub struct Router<T> {
    trees: [Tree<T>; Method::COUNT],
}

impl<T> Router<T> {
    /// Create a new router
    pub fn new() -> Self {
        Self::with_param_names(ParamNames::default())
    }

    /// Create a router whose tries all apply `param_names`
    pub fn with_param_names(param_names: ParamNames) -> Self {
        Self {
            trees: std::array::from_fn(|_| Tree::with_param_names(param_names)),
        }
    }

    /// Trie for one method
    pub fn tree(&self, method: Method) -> &Tree<T> {
        &self.trees[method.index()]
    }

    /// Add a route for one method
    pub fn insert(&mut self, method: Method, pattern: &str, value: T) -> Result<()> {
        self.trees[method.index()]
            .insert(pattern, value)
            .map_err(|e| Error::from_insert(method, e))
    }

    /// Match a request
    pub fn match_route(&self, method: Method, path: &str) -> Option<Match<'_, T>> {
        self.tree(method).find(path)
    }

    /// Match using string method; an unrecognized method never matches
    pub fn match_str(&self, method: &str, path: &str) -> Option<Match<'_, T>> {
        let method = Method::parse(method.as_bytes())?;
        self.match_route(method, path)
    }

    /// Check if a method has any routes registered
    pub fn has_routes(&self, method: Method) -> bool {
        !self.tree(method).is_empty()
    }

    /// Methods with at least one route, in table order
    pub fn methods(&self) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| self.has_routes(*m))
            .collect()
    }
}

impl<T: Clone> Router<T> {
    /// Add a route by verb name
    ///
    /// `*` inserts into every method's trie in table order. The first
    /// failure stops the broadcast; methods already inserted keep the
    /// route.
    pub fn route(&mut self, verb: &str, pattern: &str, value: T) -> Result<()> {
        for method in Method::expand(verb)? {
            self.insert(*method, pattern, value.clone())?;
        }
        Ok(())
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_method_tries() {
        let mut router: Router<&str> = Router::new();
        router.insert(Method::Get, "/users", "list").unwrap();
        router.insert(Method::Post, "/users", "create").unwrap();

        assert_eq!(*router.match_route(Method::Get, "/users").unwrap().value, "list");
        assert_eq!(*router.match_route(Method::Post, "/users").unwrap().value, "create");
        assert!(router.match_route(Method::Delete, "/users").is_none());
        assert_eq!(router.methods(), vec![Method::Get, Method::Post]);
    }

    #[test]
    fn test_unrecognized_method_never_matches() {
        let mut router: Router<&str> = Router::new();
        router.route("*", "/*", "all").unwrap();

        assert!(router.match_str("GET", "/anything").is_some());
        assert!(router.match_str("PATCH", "/anything").is_none());
        assert!(router.match_str("get", "/anything").is_none());
    }

    #[test]
    fn test_route_broadcast() {
        let mut router: Router<u32> = Router::new();
        router.route("*", "/foo/{id}", 7).unwrap();

        for method in Method::ALL {
            let m = router.match_route(method, "/foo/1").unwrap();
            assert_eq!(*m.value, 7);
            assert_eq!(m.params.get("id"), Some("1"));
        }
    }

    #[test]
    fn test_route_broadcast_stops_at_first_failure() {
        let mut router: Router<u32> = Router::new();
        router.insert(Method::Head, "/foo", 1).unwrap();

        let err = router.route("*", "/foo", 2).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateRoute {
                method: Method::Head,
                pattern: "/foo/".to_string()
            }
        );

        // methods before HEAD in table order got the route, the rest did not
        assert_eq!(*router.match_route(Method::Connect, "/foo").unwrap().value, 2);
        assert_eq!(*router.match_route(Method::Get, "/foo").unwrap().value, 2);
        assert_eq!(*router.match_route(Method::Head, "/foo").unwrap().value, 1);
        assert!(router.match_route(Method::Options, "/foo").is_none());
        assert!(router.match_route(Method::Trace, "/foo").is_none());
    }

    #[test]
    fn test_invalid_verb() {
        let mut router: Router<u32> = Router::new();
        assert_eq!(
            router.route("PATCH", "/foo", 1),
            Err(Error::InvalidVerb("PATCH".to_string()))
        );
        assert!(router.methods().is_empty());
    }

    #[test]
    fn test_wildcard_flag_is_per_method() {
        let mut router: Router<u32> = Router::new();
        router.insert(Method::Get, "/files/*", 1).unwrap();
        router.insert(Method::Post, "/files/{name}", 2).unwrap();

        assert!(router.tree(Method::Get).has_wildcard());
        assert!(!router.tree(Method::Post).has_wildcard());
        assert!(router.match_route(Method::Post, "/files/a/b").is_none());
    }

    #[test]
    fn test_reject_conflicting_param_names() {
        let mut router: Router<u32> = Router::with_param_names(ParamNames::Reject);
        router.insert(Method::Get, "/foo/{a}/x", 1).unwrap();
        router.insert(Method::Post, "/foo/{b}/y", 2).unwrap();

        let err = router.insert(Method::Get, "/foo/{b}/y", 3).unwrap_err();
        assert!(matches!(err, Error::ConflictingParam { method: Method::Get, .. }));
    }
}
