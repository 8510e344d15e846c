//! grove-core: Embeddable HTTP request router
//!
//! Register handler chains against `(verb, pattern)` pairs on a [`Mux`],
//! then hand it requests. The mux picks the most specific route for the
//! request's method and path, binds path parameters and runs the chain.
//! The listener, TLS and connection handling belong to the host server.
//!
//! ## Verbs
//! `CONNECT`, `DELETE`, `GET`, `HEAD`, `OPTIONS`, `POST`, `PUT` and
//! `TRACE`, each with its own route trie. `*` registers for all of them.
//! Requests with any other method get a 404.
//!
//! ## Example
//! ```
//! use grove_core::{Handler, Method, Mux, Request, StatusCode};
//!
//! let mut mux = Mux::new();
//! mux.get(
//!     "/files/*",
//!     [Handler::chain(|res, _req, ctx| {
//!         res.write(ctx.param("*").unwrap_or_default());
//!     })],
//! )
//! .unwrap();
//! mux.any(
//!     "/health",
//!     [Handler::terminal(|res, _req| {
//!         res.set_status(StatusCode::NO_CONTENT);
//!     })],
//! )
//! .unwrap();
//!
//! let res = mux.serve(&Request::new(Method::Get, "/files/css/site.css"));
//! assert_eq!(res.body_string().as_deref(), Some("css/site.css"));
//!
//! let res = mux.serve(&Request::new(Method::Trace, "/health"));
//! assert_eq!(res.status, StatusCode::NO_CONTENT);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod method;
pub mod mux;
pub mod request;
pub mod response;
pub mod router;

// Re-exports
pub use config::MuxConfig;
pub use context::Context;
pub use error::{Error, Result};
pub use handler::{ChainFn, Handler, HandlerFault, IntoHandler, TerminalFn};
pub use method::{Method, ANY};
pub use mux::Mux;
pub use request::Request;
pub use response::{Response, StatusCode};
pub use router::Router;

// Router re-exports
pub use grove_router::{ParamNames, Params};
