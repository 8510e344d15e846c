//! HTTP Request types
//!
//! The routed view of an incoming request. The surrounding server owns
//! the connection; it hands the mux one of these per request.

use bytes::Bytes;
use percent_encoding::percent_decode_str;
use smallvec::SmallVec;

/// HTTP Request
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method, as sent (may be one the router does not route)
    pub method: http::Method,
    /// Request path (without query string)
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// Request headers (stack-allocated for small header counts)
    pub headers: SmallVec<[(String, String); 16]>,
    /// Request body
    pub body: Bytes,
}

impl Request {
    /// Create a new request
    pub fn new(method: impl Into<http::Method>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: None,
            headers: SmallVec::new(),
            body: Bytes::new(),
        }
    }

    /// Convert from an `http` crate request
    ///
    /// The path is percent-decoded; if the decoded bytes are not UTF-8 the
    /// raw path is kept. Header values that are not visible ASCII are
    /// skipped.
    pub fn from_http(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        let raw = parts.uri.path();
        let path = match percent_decode_str(raw).decode_utf8() {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        };
        let mut request = Request::new(parts.method, path);
        request.query = parts.uri.query().map(|s| s.to_string());
        request.body = body;

        for (name, value) in &parts.headers {
            if let Ok(v) = value.to_str() {
                request.headers.push((name.to_string(), v.to_string()));
            }
        }

        request
    }

    /// Get a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
