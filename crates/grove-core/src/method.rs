//! HTTP Method enum - the closed set of routable verbs
//!
//! Each method owns one route trie. The registration-only verb `*`
//! broadcasts to all of them.

use crate::{Error, Result};

/// Registration verb that answers every method
pub const ANY: &str = "*";

static TABLE: [Method; Method::COUNT] = Method::ALL;

/// HTTP Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Method {
    Connect = 0,
    Delete = 1,
    Get = 2,
    Head = 3,
    Options = 4,
    Post = 5,
    Put = 6,
    Trace = 7,
}

impl Method {
    /// Number of routable methods
    pub const COUNT: usize = 8;

    /// Every routable method, in table order
    pub const ALL: [Method; Method::COUNT] = [
        Method::Connect,
        Method::Delete,
        Method::Get,
        Method::Head,
        Method::Options,
        Method::Post,
        Method::Put,
        Method::Trace,
    ];

    /// Parse method from bytes - optimized with early length check
    ///
    /// Method names are case-sensitive.
    #[inline(always)]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        match bytes.first()? {
            b'G' if bytes == b"GET" => Some(Method::Get),
            b'P' => match bytes {
                b"POST" => Some(Method::Post),
                b"PUT" => Some(Method::Put),
                _ => None,
            },
            b'D' if bytes == b"DELETE" => Some(Method::Delete),
            b'H' if bytes == b"HEAD" => Some(Method::Head),
            b'O' if bytes == b"OPTIONS" => Some(Method::Options),
            b'C' if bytes == b"CONNECT" => Some(Method::Connect),
            b'T' if bytes == b"TRACE" => Some(Method::Trace),
            _ => None,
        }
    }

    /// Methods a registration verb applies to: one method, or all of
    /// them for [`ANY`]
    pub fn expand(verb: &str) -> Result<&'static [Method]> {
        if verb == ANY {
            return Ok(&TABLE);
        }
        let method = verb.parse::<Method>()?;
        Ok(std::slice::from_ref(&TABLE[method.index()]))
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Connect => "CONNECT",
            Method::Delete => "DELETE",
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Trace => "TRACE",
        }
    }

    /// Position in [`Method::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::str::FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Method::parse(s.as_bytes()).ok_or_else(|| Error::InvalidVerb(s.to_string()))
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = Error;

    fn try_from(method: &http::Method) -> Result<Self> {
        method.as_str().parse()
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Connect => http::Method::CONNECT,
            Method::Delete => http::Method::DELETE,
            Method::Get => http::Method::GET,
            Method::Head => http::Method::HEAD,
            Method::Options => http::Method::OPTIONS,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Trace => http::Method::TRACE,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
