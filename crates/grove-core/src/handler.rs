//! Handler capability and chain resolution
//!
//! A route carries an ordered chain of handlers. Two shapes exist:
//! chainable handlers receive the [`Context`] and may call
//! [`Context::next`]; terminal handlers see only the response and request
//! and end the chain, so nothing may be registered after one.
//!
//! Both shapes are resolved at registration into one internal link type;
//! a terminal handler becomes a link that ignores the context.

use crate::{Context, Error, Request, Response, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Chainable handler: may advance to the next handler
pub type ChainFn = Arc<dyn Fn(&mut Response, &Request, &mut Context<'_>) + Send + Sync>;

/// Terminal handler: never advances
pub type TerminalFn = Arc<dyn Fn(&mut Response, &Request) + Send + Sync>;

/// A handler value accepted at registration
#[derive(Clone)]
pub enum Handler {
    Chain(ChainFn),
    Terminal(TerminalFn),
}

impl Handler {
    /// Wrap a chainable handler
    pub fn chain<F>(f: F) -> Self
    where
        F: Fn(&mut Response, &Request, &mut Context<'_>) + Send + Sync + 'static,
    {
        Handler::Chain(Arc::new(f))
    }

    /// Wrap a terminal handler
    pub fn terminal<F>(f: F) -> Self
    where
        F: Fn(&mut Response, &Request) + Send + Sync + 'static,
    {
        Handler::Terminal(Arc::new(f))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Handler::Terminal(_))
    }

    fn into_link(self) -> ChainFn {
        match self {
            Handler::Chain(f) => f,
            Handler::Terminal(f) => link(move |res, req, _ctx| f(res, req)),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Chain(_) => f.write_str("Handler::Chain"),
            Handler::Terminal(_) => f.write_str("Handler::Terminal"),
        }
    }
}

fn link<F>(f: F) -> ChainFn
where
    F: Fn(&mut Response, &Request, &mut Context<'_>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Why a value could not become a [`Handler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerFault {
    /// No handler was supplied
    Nil,
    /// The value has neither handler shape
    InvalidType,
}

/// Values that may be registered as handlers
///
/// Implemented for [`Handler`], for `Option<T>` (`None` is
/// [`HandlerFault::Nil`]) and for type-erased `Box<dyn Any + Send + Sync>`
/// values holding a `Handler`, a [`ChainFn`] or a [`TerminalFn`], which is
/// how hosts that receive handlers of unknown shape hand them over.
pub trait IntoHandler {
    fn into_handler(self) -> std::result::Result<Handler, HandlerFault>;
}

impl IntoHandler for Handler {
    fn into_handler(self) -> std::result::Result<Handler, HandlerFault> {
        Ok(self)
    }
}

impl<T: IntoHandler> IntoHandler for Option<T> {
    fn into_handler(self) -> std::result::Result<Handler, HandlerFault> {
        self.ok_or(HandlerFault::Nil)?.into_handler()
    }
}

impl IntoHandler for Box<dyn Any + Send + Sync> {
    fn into_handler(self) -> std::result::Result<Handler, HandlerFault> {
        let value = match self.downcast::<Handler>() {
            Ok(handler) => return Ok(*handler),
            Err(value) => value,
        };
        let value = match value.downcast::<ChainFn>() {
            Ok(f) => return Ok(Handler::Chain(*f)),
            Err(value) => value,
        };
        match value.downcast::<TerminalFn>() {
            Ok(f) => Ok(Handler::Terminal(*f)),
            Err(_) => Err(HandlerFault::InvalidType),
        }
    }
}

/// A validated, ready-to-dispatch handler chain
#[derive(Clone)]
pub(crate) struct Chain {
    links: Arc<[ChainFn]>,
}

impl Chain {
    /// Validate `handlers` in order
    ///
    /// Checks, per element: shape, then reachability, then presence.
    pub(crate) fn resolve<I>(verb: &str, pattern: &str, handlers: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoHandler,
    {
        let mut links = Vec::new();
        let mut unreachable = false;
        for item in handlers {
            let resolved = item.into_handler();
            if matches!(resolved, Err(HandlerFault::InvalidType)) {
                return Err(Error::InvalidHandlerType {
                    verb: verb.to_string(),
                    pattern: pattern.to_string(),
                });
            }
            if unreachable {
                return Err(Error::UnreachableHandler {
                    verb: verb.to_string(),
                    pattern: pattern.to_string(),
                });
            }
            let Ok(handler) = resolved else {
                return Err(Error::NilHandler {
                    verb: verb.to_string(),
                    pattern: pattern.to_string(),
                });
            };
            unreachable = handler.is_terminal();
            links.push(handler.into_link());
        }

        if links.is_empty() {
            return Err(Error::NilHandler {
                verb: verb.to_string(),
                pattern: pattern.to_string(),
            });
        }
        Ok(Self {
            links: links.into(),
        })
    }

    pub(crate) fn links(&self) -> &[ChainFn] {
        &self.links
    }

    pub(crate) fn len(&self) -> usize {
        self.links.len()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("len", &self.links.len()).finish()
    }
}
