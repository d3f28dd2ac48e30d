//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Register a path with the
//! handler a [`Chain`](crate::Chain) produced for it; different routes can
//! carry different chains.

use std::collections::HashMap;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use gantry::{Request, Response, Router};
    /// # use http::Method;
    /// # async fn find_movie(_: Request) -> Response { Response::json("{}") }
    /// # async fn create_movie(_: Request) -> Response { Response::json("{}") }
    /// Router::new()
    ///     .on(Method::GET,  "/api/v1/movies/{extlID}", find_movie)
    ///     .on(Method::POST, "/api/v1/movies",          create_movie);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, BoxedHandler::new(handler))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = matched.value.clone();
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request. Unmatched requests get a `404`.
    pub async fn handle(&self, mut req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some((handler, params)) => {
                req.set_params(params);
                handler.call(req).await
            }
            None => Error::not_found(format!("no route for {} {}", req.method(), req.path()))
                .into_response(),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use super::*;
    use crate::response::Response;

    async fn echo_id(req: Request) -> Response {
        Response::json(format!(r#"{{"id":"{}"}}"#, req.param("id").unwrap_or_default()))
    }

    fn request(method: Method, uri: &str) -> Request {
        Request::from(http::Request::builder().method(method).uri(uri).body(Bytes::new()).unwrap())
    }

    #[tokio::test]
    async fn extracts_path_params() {
        let router = Router::new().on(Method::GET, "/movies/{id}", echo_id);
        let res = router.handle(request(Method::GET, "/movies/42")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), br#"{"id":"42"}"#);
    }

    #[tokio::test]
    async fn unmatched_method_or_path_is_404() {
        let router = Router::new().on(Method::GET, "/movies/{id}", echo_id);
        let res = router.handle(request(Method::DELETE, "/movies/42")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        let res = router.handle(request(Method::GET, "/shows/42")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = Router::new()
            .on(Method::GET, "/movies/{id}", echo_id)
            .on(Method::GET, "/movies/{id}", echo_id);
    }
}
