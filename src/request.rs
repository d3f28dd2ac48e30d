//! Incoming HTTP request type.

use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use http::request::Parts;
use http::{Extensions, HeaderMap, Method, Uri};

use crate::context::{AccessToken, RequestId, RequestLogger};

/// An incoming HTTP request with its body fully read.
///
/// Build one from an [`http::Request<Bytes>`] to drive a handler without a
/// socket:
///
/// ```rust
/// use bytes::Bytes;
/// use gantry::Request;
///
/// let req = Request::from(
///     http::Request::get("/api/v1/ping").body(Bytes::new()).unwrap(),
/// );
/// assert_eq!(req.path(), "/api/v1/ping");
/// ```
#[derive(Debug)]
pub struct Request {
    pub(crate) parts: Parts,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) remote_addr: Option<SocketAddr>,
}

impl Request {
    pub(crate) fn new(parts: Parts, body: Bytes, remote_addr: SocketAddr) -> Self {
        Self { parts, body, params: HashMap::new(), remote_addr: Some(remote_addr) }
    }

    pub fn method(&self) -> &Method { &self.parts.method }
    pub fn uri(&self) -> &Uri { &self.parts.uri }
    pub fn headers(&self) -> &HeaderMap { &self.parts.headers }
    pub fn body(&self) -> &Bytes { &self.body }
    pub fn remote_addr(&self) -> Option<SocketAddr> { self.remote_addr }

    /// The URI path exactly as received: still percent-encoded, no query.
    pub fn path(&self) -> &str { self.parts.uri.path() }

    /// Header lookup. Values that are not visible ASCII read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/movies/{id}`, `req.param("id")` on `/movies/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn extensions(&self) -> &Extensions { &self.parts.extensions }
    pub fn extensions_mut(&mut self) -> &mut Extensions { &mut self.parts.extensions }

    /// The correlation id stored by the context enricher.
    pub fn request_id(&self) -> Option<RequestId> {
        self.parts.extensions.get::<RequestId>().copied()
    }

    /// The per-request logger stored by the context enricher.
    pub fn logger(&self) -> Option<&RequestLogger> {
        self.parts.extensions.get::<RequestLogger>()
    }

    /// The credential stored by the access token extractor.
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.parts.extensions.get::<AccessToken>()
    }

    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self { parts, body, params: HashMap::new(), remote_addr: None }
    }
}
