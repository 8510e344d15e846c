//! Request multiplexer
//!
//! Registration happens once at startup through [`Mux::on`] and its verb
//! helpers; after that the mux is only read, and [`Mux::serve`] may be
//! called from any number of threads at once. Registering while serving
//! requires outside synchronization.

use crate::handler::{Chain, IntoHandler};
use crate::method::ANY;
use crate::{Context, Method, MuxConfig, Request, Response, Result, Router, StatusCode};
use bytes::Bytes;
use tracing::{debug, warn};

/// HTTP request multiplexer
///
/// # Example
/// ```
/// use grove_core::{Handler, Method, Mux, Request};
///
/// let mut mux = Mux::new();
/// mux.get(
///     "/users/{id}",
///     [
///         Handler::chain(|res, req, ctx| {
///             let user = ctx.param("id").unwrap_or_default().to_string();
///             ctx.set("user", user);
///             ctx.next(res, req);
///         }),
///         Handler::chain(|res, _req, ctx| {
///             let user = ctx.get::<String>("user").cloned().unwrap_or_default();
///             res.write(format!("hello {user}"));
///         }),
///     ],
/// )
/// .unwrap();
///
/// let res = mux.serve(&Request::new(Method::Get, "/users/42"));
/// assert_eq!(res.body_string().as_deref(), Some("hello 42"));
///
/// let res = mux.serve(&Request::new(Method::Post, "/users/42"));
/// assert_eq!(res.status.as_u16(), 404);
/// ```
#[derive(Debug)]
pub struct Mux {
    router: Router<Chain>,
    config: MuxConfig,
}

impl Mux {
    /// Create a mux with the default configuration
    pub fn new() -> Self {
        Self::with_config(MuxConfig::default())
    }

    pub fn with_config(config: MuxConfig) -> Self {
        Self {
            router: Router::with_param_names(config.param_names),
            config,
        }
    }

    pub fn config(&self) -> &MuxConfig {
        &self.config
    }

    /// Register a handler chain for a verb and pattern
    ///
    /// `verb` is an uppercase method name or `*` for every method.
    /// Handlers run in order; a chainable handler continues the chain
    /// with [`Context::next`], and nothing may follow a terminal handler.
    ///
    /// With `*`, the route is added to each method in table order and the
    /// first failure is returned; methods already added keep the route.
    pub fn on<I>(&mut self, verb: &str, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        let result = Method::expand(verb)
            .and_then(|_| Chain::resolve(verb, pattern, handlers))
            .and_then(|chain| {
                let len = chain.len();
                self.router.route(verb, pattern, chain).map(|()| len)
            });

        match result {
            Ok(len) => {
                debug!(verb, pattern, handlers = len, "route registered");
                Ok(())
            }
            Err(err) => {
                warn!(verb, pattern, error = %err, "route rejected");
                Err(err)
            }
        }
    }

    /// Register for every method
    pub fn any<I>(&mut self, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        self.on(ANY, pattern, handlers)
    }

    /// Add a GET route
    pub fn get<I>(&mut self, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        self.on(Method::Get.as_str(), pattern, handlers)
    }

    /// Add a POST route
    pub fn post<I>(&mut self, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        self.on(Method::Post.as_str(), pattern, handlers)
    }

    /// Add a PUT route
    pub fn put<I>(&mut self, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        self.on(Method::Put.as_str(), pattern, handlers)
    }

    /// Add a DELETE route
    pub fn delete<I>(&mut self, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        self.on(Method::Delete.as_str(), pattern, handlers)
    }

    /// Add a HEAD route
    pub fn head<I>(&mut self, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        self.on(Method::Head.as_str(), pattern, handlers)
    }

    /// Add an OPTIONS route
    pub fn options<I>(&mut self, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        self.on(Method::Options.as_str(), pattern, handlers)
    }

    /// Add a CONNECT route
    pub fn connect<I>(&mut self, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        self.on(Method::Connect.as_str(), pattern, handlers)
    }

    /// Add a TRACE route
    pub fn trace<I>(&mut self, pattern: &str, handlers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        self.on(Method::Trace.as_str(), pattern, handlers)
    }

    /// Methods with at least one route
    pub fn methods(&self) -> Vec<Method> {
        self.router.methods()
    }

    /// Dispatch a request into a fresh 200 OK response
    pub fn serve(&self, req: &Request) -> Response {
        let mut res = Response::ok();
        self.serve_into(req, &mut res);
        res
    }

    /// Dispatch a request, writing into `res`
    ///
    /// Runs the matched chain from its first handler. When the method is
    /// not routable or no route matches, `res` is replaced with the
    /// configured 404 response.
    pub fn serve_into(&self, req: &Request, res: &mut Response) {
        let Some(method) = Method::parse(req.method.as_str().as_bytes()) else {
            debug!(method = %req.method, path = %req.path, "method not routed");
            self.not_found(res);
            return;
        };
        let Some(matched) = self.router.match_route(method, &req.path) else {
            debug!(method = %req.method, path = %req.path, "no route matched");
            self.not_found(res);
            return;
        };

        debug!(
            method = %req.method,
            path = %req.path,
            pattern = matched.pattern,
            params = matched.params.len(),
            "route matched"
        );
        let mut ctx = Context::new(matched.params, matched.value.links(), matched.pattern);
        ctx.start(res, req);
    }

    /// Dispatch an `http` crate request
    pub fn serve_http(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.serve(&Request::from_http(req)).into_http()
    }

    fn not_found(&self, res: &mut Response) {
        res.reset(StatusCode::NOT_FOUND);
        res.set_header("content-type", self.config.not_found_content_type.as_str());
        res.write(self.config.not_found_body.as_bytes());
    }
}

impl Default for Mux {
    fn default() -> Self {
        Self::new()
    }
}
