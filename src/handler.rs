//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router and the middleware chain hold handlers of *different* types
//! behind one type, [`BoxedHandler`]. Any `async fn(Request) -> impl
//! IntoResponse` becomes one:
//!
//! ```text
//! async fn create(req: Request) -> Result<…, Error> { … }  ← user writes this
//!        ↓ chain.then(create)
//! BoxedHandler::new(create)                               ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(create))                             ← heap-allocated wrapper
//!        ↓
//! handler.call(req)  at request time                      ← one vtable dispatch
//!        ↓
//! Box::pin(async { create(req).await.into_response() })   ← BoxFuture
//! ```
//!
//! Middleware are plain `Fn(BoxedHandler) -> BoxedHandler` values: they take
//! the next handler and return a new one that wraps it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
trait ErasedHandler: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture;
}

// ── BoxedHandler ──────────────────────────────────────────────────────────────

/// A type-erased handler shared across concurrent requests.
///
/// Cloning is one atomic increment. This is what middleware receive and
/// return, and what a [`Chain`](crate::Chain) produces.
#[derive(Clone)]
pub struct BoxedHandler(Arc<dyn ErasedHandler>);

impl BoxedHandler {
    pub fn new(handler: impl Handler) -> Self {
        handler.into_boxed_handler()
    }

    /// Runs the handler on one request.
    pub fn call(&self, req: Request) -> BoxFuture {
        self.0.call(req)
    }
}

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Satisfied by any function or closure with the signature
///
/// ```text
/// Fn(Request) -> impl Future<Output = impl IntoResponse>
/// ```
///
/// and by [`BoxedHandler`] itself. The trait is **sealed**: only the impls
/// in this module can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        BoxedHandler(Arc::new(FnHandler(self)))
    }
}

impl private::Sealed for BoxedHandler {}

impl Handler for BoxedHandler {
    fn into_boxed_handler(self) -> BoxedHandler { self }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype wrapper that holds a concrete handler `F` and implements
/// [`ErasedHandler`], bridging the typed world to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use super::*;

    fn request() -> Request {
        Request::from(http::Request::get("/").body(Bytes::new()).unwrap())
    }

    #[tokio::test]
    async fn closure_becomes_handler() {
        let h = BoxedHandler::new(|_req: Request| async { StatusCode::ACCEPTED });
        assert_eq!(h.call(request()).await.status_code(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn boxed_handler_boxes_to_itself() {
        let h = BoxedHandler::new(|_req: Request| async { StatusCode::NO_CONTENT });
        let again = BoxedHandler::new(h.clone());
        assert_eq!(again.call(request()).await.status_code(), StatusCode::NO_CONTENT);
    }
}
