//! Middleware and the chain that composes them.
//!
//! A middleware is any `Fn(BoxedHandler) -> BoxedHandler`: it receives the
//! next handler and returns one that wraps it. A [`Chain`] is an ordered list
//! of them. [`Chain::then`] folds the list right-to-left around a terminal
//! handler, so the first middleware appended sees the request first and the
//! response last.
//!
//! ```rust,no_run
//! use gantry::middleware::{self, Chain};
//! use gantry::{Logger, Request, Response};
//!
//! # async fn create_movie(_: Request) -> Response { Response::json("{}") }
//! # async fn ping(_: Request) -> Response { Response::json("{}") }
//! let logger = Logger::current();
//!
//! // Shared prefix: enricher → JSON content type.
//! let base = middleware::logger_chain(logger, Chain::new())
//!     .append(middleware::json_content_type);
//!
//! let public = base.then(ping);
//! let authed = base.append(middleware::access_token).then(create_movie);
//! ```

mod access_token;
mod json;
mod trace;

use std::fmt;
use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};
use crate::logger::Logger;

pub use access_token::access_token;
pub use json::json_content_type;
pub use trace::{ACCESS_TARGET, REQUEST_ID_HEADER, context_enricher};

type Layer<H> = Arc<dyn Fn(H) -> H + Send + Sync + 'static>;

/// An ordered, appendable list of middleware.
///
/// Generic over the handler type so the composition itself can be exercised
/// without HTTP; the default `BoxedHandler` is what routes use.
pub struct Chain<H = BoxedHandler> {
    layers: Vec<Layer<H>>,
}

impl<H: 'static> Chain<H> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Adds a middleware after every one already in the chain.
    pub fn append(mut self, middleware: impl Fn(H) -> H + Send + Sync + 'static) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    /// Adds every middleware of `other`, in order, after this chain's.
    pub fn extend(mut self, other: Chain<H>) -> Self {
        self.layers.extend(other.layers);
        self
    }

    pub fn len(&self) -> usize { self.layers.len() }
    pub fn is_empty(&self) -> bool { self.layers.is_empty() }

    /// Wraps `base` in every middleware, last appended innermost.
    pub fn wrap(&self, base: H) -> H {
        self.layers.iter().rev().fold(base, |next, layer| layer(next))
    }
}

impl Chain<BoxedHandler> {
    /// Terminates the chain with `handler`.
    pub fn then(&self, handler: impl Handler) -> BoxedHandler {
        self.wrap(BoxedHandler::new(handler))
    }
}

impl<H> Clone for Chain<H> {
    fn clone(&self) -> Self {
        Self { layers: self.layers.clone() }
    }
}

impl<H: 'static> Default for Chain<H> {
    fn default() -> Self { Self::new() }
}

impl<H> fmt::Debug for Chain<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("len", &self.layers.len()).finish()
    }
}

// ── Presets ───────────────────────────────────────────────────────────────────

/// Appends the context enricher to `chain`.
///
/// Call this on an empty chain: everything after the enricher relies on the
/// request id and logger it stores.
pub fn logger_chain(logger: Logger, chain: Chain) -> Chain {
    chain.append(context_enricher(logger))
}

/// Enricher, JSON content type, then the bearer-token gate.
pub fn standard_chain(logger: Logger) -> Chain {
    logger_chain(logger, Chain::new())
        .append(json_content_type)
        .append(access_token)
}
