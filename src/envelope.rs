//! The standard success envelope.

use serde::Serialize;

use crate::error::{Error, Kind};
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Wraps every non-error response body:
///
/// ```json
/// {"path": "/api/v1/movies", "request_id": "0190…", "data": { … }}
/// ```
#[derive(Debug, Serialize)]
pub struct StandardResponse<T> {
    pub path: String,
    pub request_id: String,
    pub data: T,
}

impl<T: Serialize> StandardResponse<T> {
    /// Builds the envelope for `req`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the request carries no request id, which
    /// means the context enricher is missing from the chain.
    pub fn new(req: &Request, data: T) -> Result<Self, Error> {
        let request_id = req
            .request_id()
            .ok_or_else(|| Error::internal("request ID not properly set to request context"))?;
        Ok(Self { path: req.path().to_owned(), request_id: request_id.to_string(), data })
    }
}

/// `200 OK` with the serialized envelope.
impl<T: Serialize> IntoResponse for StandardResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self) {
            Ok(bytes) => Response::json(bytes),
            Err(e) => Error::wrap(Kind::Internal, e).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::context::RequestId;

    fn request(uri: &str) -> Request {
        Request::from(http::Request::get(uri).body(Bytes::new()).unwrap())
    }

    #[test]
    fn missing_request_id_is_internal() {
        let err = StandardResponse::new(&request("/api/v1/movies"), 1).unwrap_err();
        assert_eq!(err.kind(), Kind::Internal);
    }

    #[test]
    fn path_is_escaped_and_query_free() {
        let mut req = request("/api/v1/movies/Repo%20Man?rated=R");
        let id = RequestId::generate();
        req.extensions_mut().insert(id);

        let sr = StandardResponse::new(&req, json!({"title": "Repo Man"})).unwrap();
        assert_eq!(sr.path, "/api/v1/movies/Repo%20Man");
        assert_eq!(sr.request_id, id.to_string());

        let res = sr.into_response();
        assert_eq!(res.status_code(), 200);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "path": "/api/v1/movies/Repo%20Man",
                "request_id": id.to_string(),
                "data": {"title": "Repo Man"},
            })
        );
    }
}
