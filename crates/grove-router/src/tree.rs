//! Route trie for a single verb
//!
//! Each node owns three disjoint child namespaces: literal children keyed
//! by segment text, one named-parameter slot and one wildcard slot.
//! Lookup precedence at every position is static, then named, then the
//! most proximate wildcard seen so far on the way down.

use crate::error::InsertError;
use crate::params::{Params, WILDCARD_PARAM};
use crate::pattern::{segments, Pattern, Token};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// How to treat two different parameter names at the same trie position
/// (`/foo/{a}/x` and `/foo/{b}/y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamNames {
    /// The later registration's name is bound for every route through
    /// the shared node
    #[default]
    LastWins,
    /// Fail the later registration with [`InsertError::ConflictingParam`]
    Reject,
}

/// Route match result
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'t, V> {
    /// Value stored at the matched node
    pub value: &'t V,
    /// Normalized pattern the value was registered under
    pub pattern: &'t str,
    /// Bound path parameters
    pub params: Params,
}

#[derive(Debug)]
struct Route<V> {
    pattern: Box<str>,
    value: V,
}

#[derive(Debug)]
struct Node<V> {
    statics: HashMap<Box<str>, Node<V>>,
    named: Option<Box<Node<V>>>,
    wildcard: Option<Box<Node<V>>>,
    /// Parameter name, set on named and wildcard nodes
    name: Option<Arc<str>>,
    /// `None` means no route ends here
    route: Option<Route<V>>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            statics: HashMap::new(),
            named: None,
            wildcard: None,
            name: None,
            route: None,
        }
    }
}

impl<V> Node<V> {
    fn matched(&self, params: Params) -> Option<Match<'_, V>> {
        self.route.as_ref().map(|route| Match {
            value: &route.value,
            pattern: &route.pattern,
            params,
        })
    }
}

/// Deepest wildcard seen so far during a walk
struct Proximate<'t, V> {
    node: &'t Node<V>,
    /// Index of the first segment the wildcard would consume
    start: usize,
    /// Number of params bound before reaching the wildcard's parent
    bound: usize,
}

/// Route trie for one verb
#[derive(Debug)]
pub struct Tree<V> {
    root: Node<V>,
    /// Set once any wildcard route is inserted
    wild: bool,
    routes: usize,
    param_names: ParamNames,
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Tree<V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::with_param_names(ParamNames::default())
    }

    /// Create an empty tree that applies `param_names` on insert
    pub fn with_param_names(param_names: ParamNames) -> Self {
        Self {
            root: Node::default(),
            wild: false,
            routes: 0,
            param_names,
        }
    }

    /// Whether any wildcard route exists in this tree
    pub fn has_wildcard(&self) -> bool {
        self.wild
    }

    /// Number of routes inserted
    pub fn len(&self) -> usize {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// Insert a route
    ///
    /// Intermediate nodes are created as needed and kept even if the
    /// insertion then fails. A misplaced wildcard is detected before any
    /// node is created.
    ///
    /// # Example
    /// ```
    /// use grove_router::{InsertError, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("/users/{id}", 1).unwrap();
    /// assert_eq!(
    ///     tree.insert("/users/{id}/", 2),
    ///     Err(InsertError::DuplicateRoute { pattern: "/users/{id}/".to_string() })
    /// );
    /// ```
    pub fn insert(&mut self, pattern: &str, value: V) -> Result<(), InsertError> {
        let pattern = Pattern::parse(pattern);
        if pattern.misplaced_wildcard().is_some() {
            return Err(InsertError::WildcardNotTerminal {
                pattern: pattern.to_string(),
            });
        }

        let policy = self.param_names;
        let mut node = &mut self.root;
        for token in pattern.tokens() {
            node = match token {
                Token::Static(literal) => node.statics.entry(literal.as_str().into()).or_default(),
                Token::Named(name) => {
                    let child = node.named.get_or_insert_with(Box::default);
                    if let Some(existing) = child.name.as_deref() {
                        if existing != name.as_str() && policy == ParamNames::Reject {
                            return Err(InsertError::ConflictingParam {
                                pattern: pattern.to_string(),
                                existing: existing.to_string(),
                                name: name.clone(),
                            });
                        }
                    }
                    if child.name.as_deref() != Some(name.as_str()) {
                        child.name = Some(Arc::from(name.as_str()));
                    }
                    &mut **child
                }
                Token::Wildcard => {
                    let child = node.wildcard.get_or_insert_with(Box::default);
                    child.name.get_or_insert_with(|| Arc::from(WILDCARD_PARAM));
                    &mut **child
                }
            };
        }

        if node.route.is_some() {
            return Err(InsertError::DuplicateRoute {
                pattern: pattern.to_string(),
            });
        }
        node.route = Some(Route {
            pattern: pattern.as_str().into(),
            value,
        });

        self.wild |= pattern.has_wildcard();
        self.routes += 1;
        Ok(())
    }

    /// Find the route matching `path`
    ///
    /// # Example
    /// ```
    /// use grove_router::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("/files/*", "files").unwrap();
    ///
    /// let m = tree.find("/files/docs/readme.md").unwrap();
    /// assert_eq!(*m.value, "files");
    /// assert_eq!(m.params.wildcard(), Some("docs/readme.md"));
    /// assert!(tree.find("/files").is_none());
    /// ```
    pub fn find(&self, path: &str) -> Option<Match<'_, V>> {
        let segments: SmallVec<[&str; 16]> = segments(path).collect();
        if segments.is_empty() {
            return self.find_root();
        }
        if self.wild {
            self.find_wild(&segments)
        } else {
            self.find_plain(&segments)
        }
    }

    /// `/` matches the root route, else a root-level wildcard with an
    /// empty remainder. No other wildcard ever matches an empty remainder.
    fn find_root(&self) -> Option<Match<'_, V>> {
        if let Some(m) = self.root.matched(Params::new()) {
            return Some(m);
        }
        let wild = self.root.wildcard.as_deref()?;
        let mut params = Params::new();
        params.push(wildcard_name(wild), String::new());
        wild.matched(params)
    }

    fn find_plain(&self, segments: &[&str]) -> Option<Match<'_, V>> {
        let mut node = &self.root;
        let mut params = Params::new();

        for &segment in segments {
            node = if let Some(child) = node.statics.get(segment) {
                child
            } else {
                let child = node.named.as_deref()?;
                if let Some(name) = &child.name {
                    params.push(Arc::clone(name), segment);
                }
                child
            };
        }

        node.matched(params)
    }

    fn find_wild(&self, segments: &[&str]) -> Option<Match<'_, V>> {
        let mut node = &self.root;
        let mut params = Params::new();
        let mut proximate: Option<Proximate<'_, V>> = None;

        for (index, &segment) in segments.iter().enumerate() {
            if let Some(wild) = node.wildcard.as_deref() {
                proximate = Some(Proximate {
                    node: wild,
                    start: index,
                    bound: params.len(),
                });
            }

            if let Some(child) = node.statics.get(segment) {
                node = child;
            } else if let Some(child) = node.named.as_deref() {
                if let Some(name) = &child.name {
                    params.push(Arc::clone(name), segment);
                }
                node = child;
            } else {
                return Self::fall_back(proximate?, segments, params);
            }
        }

        if node.route.is_some() {
            return node.matched(params);
        }
        Self::fall_back(proximate?, segments, params)
    }

    fn fall_back<'t>(
        wild: Proximate<'t, V>,
        segments: &[&str],
        mut params: Params,
    ) -> Option<Match<'t, V>> {
        params.truncate(wild.bound);
        params.push(wildcard_name(wild.node), segments[wild.start..].join("/"));
        wild.node.matched(params)
    }
}

fn wildcard_name<V>(node: &Node<V>) -> Arc<str> {
    node.name
        .clone()
        .unwrap_or_else(|| Arc::from(WILDCARD_PARAM))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(patterns: &[&'static str]) -> Tree<&'static str> {
        let mut tree = Tree::new();
        for pattern in patterns {
            tree.insert(pattern, *pattern).unwrap();
        }
        tree
    }

    fn found(tree: &Tree<&'static str>, path: &str) -> Option<&'static str> {
        tree.find(path).map(|m| *m.value)
    }

    #[test]
    fn test_static_routes() {
        let tree = tree(&["/", "/users", "/users/list"]);

        assert_eq!(found(&tree, "/"), Some("/"));
        assert_eq!(found(&tree, ""), Some("/"));
        assert_eq!(found(&tree, "/users"), Some("/users"));
        assert_eq!(found(&tree, "/users/list"), Some("/users/list"));
        assert_eq!(found(&tree, "/unknown"), None);
        assert_eq!(found(&tree, "/users/list/more"), None);
        assert!(!tree.has_wildcard());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_trailing_slash_implied() {
        let tree = tree(&["/foo/bar", "/baz/"]);

        assert_eq!(found(&tree, "/foo/bar/"), Some("/foo/bar"));
        assert_eq!(found(&tree, "/foo/bar"), Some("/foo/bar"));
        assert_eq!(found(&tree, "/baz"), Some("/baz/"));
        assert_eq!(found(&tree, "//foo//bar//"), Some("/foo/bar"));
    }

    #[test]
    fn test_param_routes() {
        let tree = tree(&["/foo/{bar}/baz/{qux}"]);

        let m = tree.find("/foo/BAR/baz/QUX").unwrap();
        assert_eq!(m.pattern, "/foo/{bar}/baz/{qux}/");
        assert_eq!(m.params.get("bar"), Some("BAR"));
        assert_eq!(m.params.get("qux"), Some("QUX"));
        assert_eq!(m.params.len(), 2);

        assert!(tree.find("/foo/BAR/baz").is_none());
        assert!(tree.find("/foo/BAR/baz/QUX/extra").is_none());
    }

    #[test]
    fn test_intermediate_node_without_route() {
        let tree = tree(&["/foo/bar/baz"]);
        assert!(tree.find("/foo/bar").is_none());
        assert!(tree.find("/foo").is_none());
    }

    #[test]
    fn test_static_beats_named() {
        let tree = tree(&["/users/{id}", "/users/me"]);

        assert_eq!(found(&tree, "/users/me"), Some("/users/me"));
        let m = tree.find("/users/42").unwrap();
        assert_eq!(*m.value, "/users/{id}");
        assert_eq!(m.params.get("id"), Some("42"));
    }

    #[test]
    fn test_named_beats_wildcard() {
        let tree = tree(&["/api/{version}", "/api/*"]);

        let m = tree.find("/api/v1").unwrap();
        assert_eq!(*m.value, "/api/{version}");
        assert_eq!(m.params.get("version"), Some("v1"));

        let m = tree.find("/api/v1/users").unwrap();
        assert_eq!(*m.value, "/api/*");
        assert_eq!(m.params.wildcard(), Some("v1/users"));
        assert!(!m.params.contains("version"));
    }

    #[test]
    fn test_wildcard_rejects_empty_remainder() {
        let tree = tree(&["/foo/bar/*"]);

        assert!(tree.find("/foo/bar").is_none());
        assert!(tree.find("/foo/bar/").is_none());

        let m = tree.find("/foo/bar/baz/qux").unwrap();
        assert_eq!(m.params.wildcard(), Some("baz/qux"));
        assert_eq!(m.pattern, "/foo/bar/*/");
    }

    #[test]
    fn test_root_wildcard() {
        let tree = tree(&["/*"]);

        let m = tree.find("/").unwrap();
        assert_eq!(*m.value, "/*");
        assert_eq!(m.params.wildcard(), Some(""));

        let m = tree.find("/a/b").unwrap();
        assert_eq!(m.params.wildcard(), Some("a/b"));
    }

    #[test]
    fn test_root_route_beats_root_wildcard() {
        let tree = tree(&["/*", "/"]);

        let m = tree.find("/").unwrap();
        assert_eq!(*m.value, "/");
        assert!(m.params.is_empty());
    }

    #[test]
    fn test_competing_wildcards() {
        let tree = tree(&["/*", "/foo/*", "/foo/bar/*"]);

        let m = tree.find("/foo/bar/bar/baz").unwrap();
        assert_eq!(*m.value, "/foo/bar/*");
        assert_eq!(m.params.wildcard(), Some("bar/baz"));

        let m = tree.find("/foo/baz").unwrap();
        assert_eq!(*m.value, "/foo/*");
        assert_eq!(m.params.wildcard(), Some("baz"));

        let m = tree.find("/bar/baz").unwrap();
        assert_eq!(*m.value, "/*");
        assert_eq!(m.params.wildcard(), Some("bar/baz"));

        // `/foo/bar/*` needs a remainder, so the next wildcard up wins
        let m = tree.find("/foo/bar").unwrap();
        assert_eq!(*m.value, "/foo/*");
        assert_eq!(m.params.wildcard(), Some("bar"));
    }

    #[test]
    fn test_wildcard_after_param() {
        let tree = tree(&["/foo/{bar}/*"]);

        let m = tree.find("/foo/ABC/baz").unwrap();
        assert_eq!(m.params.get("bar"), Some("ABC"));
        assert_eq!(m.params.wildcard(), Some("baz"));
        assert!(tree.find("/foo/ABC").is_none());
    }

    #[test]
    fn test_dead_end_falls_back_to_proximate_wildcard() {
        let tree = tree(&["/foo/*", "/foo/bar/baz", "/foo/{id}/edit"]);

        // static descent dead-ends below `bar`
        let m = tree.find("/foo/bar/qux").unwrap();
        assert_eq!(*m.value, "/foo/*");
        assert_eq!(m.params.wildcard(), Some("bar/qux"));

        // `bar` exists but carries no route
        let m = tree.find("/foo/bar").unwrap();
        assert_eq!(*m.value, "/foo/*");

        // named descent dead-ends; its binding is discarded
        let m = tree.find("/foo/7/view").unwrap();
        assert_eq!(*m.value, "/foo/*");
        assert_eq!(m.params.wildcard(), Some("7/view"));
        assert!(!m.params.contains("id"));

        let m = tree.find("/foo/7/edit").unwrap();
        assert_eq!(*m.value, "/foo/{id}/edit");
        assert_eq!(m.params.get("id"), Some("7"));
    }

    #[test]
    fn test_no_wildcard_anywhere_fails_fast() {
        let tree = tree(&["/foo/{id}"]);
        assert!(!tree.has_wildcard());
        assert!(tree.find("/bar/1").is_none());
        assert!(tree.find("/").is_none());
    }

    #[test]
    fn test_duplicate_route() {
        let mut tree = Tree::new();
        tree.insert("/foo/{bar}", 1).unwrap();

        let err = tree.insert("foo/{bar}/", 2).unwrap_err();
        assert_eq!(
            err,
            InsertError::DuplicateRoute {
                pattern: "/foo/{bar}/".to_string()
            }
        );

        // first registration is intact
        assert_eq!(*tree.find("/foo/x").unwrap().value, 1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_duplicate_root() {
        let mut tree = Tree::new();
        tree.insert("/", 1).unwrap();
        assert!(matches!(
            tree.insert("", 2),
            Err(InsertError::DuplicateRoute { .. })
        ));
    }

    #[test]
    fn test_wildcard_not_terminal() {
        let mut tree: Tree<u32> = Tree::new();
        let err = tree.insert("/foo/*/bar", 1).unwrap_err();
        assert_eq!(
            err,
            InsertError::WildcardNotTerminal {
                pattern: "/foo/*/bar/".to_string()
            }
        );
        assert!(!tree.has_wildcard());
        assert!(tree.is_empty());
        assert!(tree.find("/foo/x/bar").is_none());
    }

    #[test]
    fn test_param_names_last_wins() {
        let tree = tree(&["/foo/{a}/x", "/foo/{b}/y"]);

        let m = tree.find("/foo/1/x").unwrap();
        assert_eq!(*m.value, "/foo/{a}/x");
        assert_eq!(m.params.get("b"), Some("1"));
        assert_eq!(m.params.get("a"), None);
    }

    #[test]
    fn test_param_names_reject() {
        let mut tree = Tree::with_param_names(ParamNames::Reject);
        tree.insert("/foo/{a}/x", 1).unwrap();
        tree.insert("/foo/{a}/z", 3).unwrap();

        let err = tree.insert("/foo/{b}/y", 2).unwrap_err();
        assert_eq!(
            err,
            InsertError::ConflictingParam {
                pattern: "/foo/{b}/y/".to_string(),
                existing: "a".to_string(),
                name: "b".to_string(),
            }
        );
        assert_eq!(tree.find("/foo/1/x").unwrap().params.get("a"), Some("1"));
        assert!(tree.find("/foo/1/y").is_none());
    }
}
