//! HTTP Response types
//!
//! Handlers write into a `&mut Response`; the surrounding server turns it
//! into bytes on the wire.

use crate::{Error, Result};
use bytes::{Bytes, BytesMut};
use smallvec::SmallVec;

/// HTTP Status Code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    // 2xx Success
    pub const OK: StatusCode = StatusCode(200);
    pub const NO_CONTENT: StatusCode = StatusCode(204);

    // 4xx Client Errors
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const IM_A_TEAPOT: StatusCode = StatusCode(418);

    /// Get the numeric code
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Get the reason phrase
    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            204 => "No Content",
            404 => "Not Found",
            418 => "I'm a teapot",
            _ => "Unknown",
        }
    }

    /// Check if this is a client error status (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

/// HTTP Response
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code
    pub status: StatusCode,
    /// Response headers (stack-allocated for small header counts)
    pub headers: SmallVec<[(String, String); 8]>,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: SmallVec::new(),
            body: Bytes::new(),
        }
    }

    /// Create a 200 OK response
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Set the status code
    pub fn set_status(&mut self, status: impl Into<StatusCode>) -> &mut Self {
        self.status = status.into();
        self
    }

    /// Set a header, replacing any existing value (case-insensitive)
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Append to the body
    pub fn write(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        let data = data.as_ref();
        if self.body.is_empty() {
            self.body = Bytes::copy_from_slice(data);
        } else {
            let mut buf = BytesMut::with_capacity(self.body.len() + data.len());
            buf.extend_from_slice(&self.body);
            buf.extend_from_slice(data);
            self.body = buf.freeze();
        }
        self
    }

    /// Reset to `status` with no headers and an empty body
    pub fn reset(&mut self, status: StatusCode) {
        *self = Self::new(status);
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get content-type header
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get body as string (if UTF-8)
    pub fn body_string(&self) -> Option<String> {
        std::str::from_utf8(&self.body).ok().map(|s| s.to_string())
    }

    /// Convert into an `http` crate response
    pub fn into_http(self) -> Result<http::Response<Bytes>> {
        let mut builder = http::Response::builder().status(self.status.as_u16());

        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder
            .body(self.body)
            .map_err(|e| Error::InvalidHeader(e.to_string()))
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}
