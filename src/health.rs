//! Built-in liveness handler.
//!
//! | Path | Auth | Body |
//! |---|---|---|
//! | `GET /api/v1/ping` | none | `{"path":…,"request_id":…,"data":{"status":"ok"}}` |
//!
//! The ping handler sits behind the enricher like every other route, so its
//! response carries a request id:
//!
//! ```rust,no_run
//! use gantry::middleware::{self, Chain};
//! use gantry::{Logger, Router, health};
//!
//! let chain = middleware::logger_chain(Logger::current(), Chain::new())
//!     .append(middleware::json_content_type);
//! let app = Router::new().on(http::Method::GET, health::PING_PATH, chain.then(health::ping));
//! ```

use serde::Serialize;

use crate::envelope::StandardResponse;
use crate::error::Error;
use crate::request::Request;

pub const PING_PATH: &str = "/api/v1/ping";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Ping {
    pub status: &'static str,
}

/// Always answers `{"status":"ok"}`. If the process can respond at all, it is
/// alive.
pub async fn ping(req: Request) -> Result<StandardResponse<Ping>, Error> {
    StandardResponse::new(&req, Ping { status: "ok" })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use super::*;
    use crate::context::RequestId;
    use crate::response::IntoResponse;

    #[tokio::test]
    async fn answers_ok_inside_envelope() {
        let id = RequestId::generate();
        let mut req = Request::from(http::Request::get(PING_PATH).body(Bytes::new()).unwrap());
        req.extensions_mut().insert(id);

        let res = ping(req).await.into_response();
        assert_eq!(res.status_code(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["path"], PING_PATH);
        assert_eq!(body["request_id"], id.to_string());
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn missing_request_id_is_internal() {
        let req = Request::from(http::Request::get(PING_PATH).body(Bytes::new()).unwrap());
        let res = ping(req).await.into_response();
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
