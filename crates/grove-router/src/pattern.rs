//! Route pattern normalization
//!
//! Patterns are `/`-separated token sequences. A trailing separator is
//! always implied and runs of separators collapse into one, so `foo//bar`,
//! `/foo/bar` and `/foo/bar/` all normalize to `/foo/bar/`.

/// Segment separator
pub const SEPARATOR: char = '/';

/// A segment consisting of exactly this marker is a wildcard token
pub const WILDCARD: &str = "*";

/// One classified pattern segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, matched exactly
    Static(String),
    /// `{name}` - matches any single segment and binds it to `name`
    Named(String),
    /// `*` - matches the rest of the path; must be the final token
    Wildcard,
}

impl Token {
    /// Classify a single non-empty segment
    pub fn classify(segment: &str) -> Self {
        if segment == WILDCARD {
            return Token::Wildcard;
        }
        match segment
            .strip_prefix('{')
            .and_then(|inner| inner.strip_suffix('}'))
        {
            Some(name) if is_identifier(name) => Token::Named(name.to_string()),
            _ => Token::Static(segment.to_string()),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Token::Wildcard)
    }
}

/// A normalized pattern and its tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    normalized: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Normalize `raw` and split it into tokens
    ///
    /// # Example
    /// ```
    /// use grove_router::{Pattern, Token};
    ///
    /// let pattern = Pattern::parse("users//{id}/*");
    /// assert_eq!(pattern.as_str(), "/users/{id}/*/");
    /// assert_eq!(
    ///     pattern.tokens(),
    ///     &[
    ///         Token::Static("users".to_string()),
    ///         Token::Named("id".to_string()),
    ///         Token::Wildcard,
    ///     ]
    /// );
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut normalized = String::with_capacity(raw.len() + 2);
        let mut tokens = Vec::new();
        normalized.push(SEPARATOR);
        for segment in segments(raw) {
            normalized.push_str(segment);
            normalized.push(SEPARATOR);
            tokens.push(Token::classify(segment));
        }
        Self { normalized, tokens }
    }

    /// Normalized form: leading and trailing `/`, no empty segments
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The root pattern has no tokens and matches only `/`
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Position of a wildcard token that is not the last token, if any
    pub(crate) fn misplaced_wildcard(&self) -> Option<usize> {
        let last = self.tokens.len().checked_sub(1)?;
        self.tokens[..last].iter().position(Token::is_wildcard)
    }

    pub(crate) fn has_wildcard(&self) -> bool {
        self.tokens.last().is_some_and(Token::is_wildcard)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Shorthand for [`Pattern::parse`]
pub fn normalize(raw: &str) -> Pattern {
    Pattern::parse(raw)
}

/// Non-empty segments of a pattern or request path
///
/// Splitting this way implies both boundary separators and collapses
/// duplicate ones, which is the whole of path normalization.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|segment| !segment.is_empty())
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_slashes_implied() {
        assert_eq!(Pattern::parse("foo/bar").as_str(), "/foo/bar/");
        assert_eq!(Pattern::parse("/foo/bar").as_str(), "/foo/bar/");
        assert_eq!(Pattern::parse("/foo/bar/").as_str(), "/foo/bar/");
    }

    #[test]
    fn test_duplicate_slashes_collapse() {
        let pattern = Pattern::parse("//foo///bar//");
        assert_eq!(pattern.as_str(), "/foo/bar/");
        assert_eq!(pattern.tokens().len(), 2);
    }

    #[test]
    fn test_root_pattern() {
        for raw in ["", "/", "///"] {
            let pattern = Pattern::parse(raw);
            assert!(pattern.is_root(), "{raw:?} should be root");
            assert_eq!(pattern.as_str(), "/");
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Token::classify("users"), Token::Static("users".to_string()));
        assert_eq!(Token::classify("{id}"), Token::Named("id".to_string()));
        assert_eq!(Token::classify("{post_id2}"), Token::Named("post_id2".to_string()));
        assert_eq!(Token::classify("*"), Token::Wildcard);
    }

    #[test]
    fn test_malformed_params_are_static() {
        for segment in ["{}", "{id", "id}", "x{id}", "{id}x", "{a-b}", "**", "*x"] {
            assert_eq!(
                Token::classify(segment),
                Token::Static(segment.to_string()),
                "{segment:?}"
            );
        }
    }

    #[test]
    fn test_misplaced_wildcard() {
        assert_eq!(Pattern::parse("/foo/*").misplaced_wildcard(), None);
        assert_eq!(Pattern::parse("/foo/*/bar").misplaced_wildcard(), Some(1));
        assert_eq!(Pattern::parse("/*/*").misplaced_wildcard(), Some(0));
        assert_eq!(Pattern::parse("/").misplaced_wildcard(), None);
    }
}
