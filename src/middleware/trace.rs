//! Context enricher: request id, per-request span, access log.

use std::time::Instant;

use http::HeaderValue;
use http::header::{REFERER, USER_AGENT};
use tracing::instrument::WithSubscriber;
use tracing::{Instrument, info, info_span};

use crate::context::{RequestId, RequestLogger};
use crate::handler::BoxedHandler;
use crate::logger::Logger;
use crate::request::Request;
use crate::response::Response;

/// Response header carrying the correlation id.
pub const REQUEST_ID_HEADER: &str = "request-id";

/// Target of the one-line-per-request access log event.
pub const ACCESS_TARGET: &str = "gantry::access";

/// Builds the context enricher around `logger`.
///
/// For every request it:
/// 1. generates a [`RequestId`] and opens a `request` span carrying it along
///    with the remote IP, user agent and referer;
/// 2. stores the id and span in the request context;
/// 3. runs the rest of the chain inside the span with `logger` as the
///    default subscriber;
/// 4. sets the `Request-Id` response header and emits the access log line
///    (method, URL, status, size, duration).
///
/// Must be the first middleware of every chain.
pub fn context_enricher(
    logger: Logger,
) -> impl Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static {
    move |next| {
        let logger = logger.clone();
        BoxedHandler::new(move |req: Request| enrich(logger.clone(), next.clone(), req))
    }
}

async fn enrich(logger: Logger, next: BoxedHandler, mut req: Request) -> Response {
    let request_id = RequestId::generate();
    let remote_ip = req.remote_addr().map(|addr| addr.ip().to_string()).unwrap_or_default();
    let span = logger.in_scope(|| {
        info_span!(
            "request",
            request_id = %request_id,
            remote_ip = %remote_ip,
            user_agent = req.header(USER_AGENT.as_str()).unwrap_or_default(),
            referer = req.header(REFERER.as_str()).unwrap_or_default(),
        )
    });

    let method = req.method().clone();
    let url = req.uri().clone();
    req.extensions_mut().insert(request_id);
    req.extensions_mut().insert(RequestLogger(span.clone()));

    let started = Instant::now();
    async move {
        let mut res = next.call(req).await;
        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        info!(
            target: ACCESS_TARGET,
            method = %method,
            url = %url,
            status = res.status_code().as_u16(),
            size = res.body().len(),
            duration = ?started.elapsed(),
            "request completed"
        );
        res
    }
    .instrument(span)
    .with_subscriber(logger.dispatch().clone())
    .await
}
