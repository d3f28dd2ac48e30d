//! Response content-type middleware.

use http::header::CONTENT_TYPE;

use crate::handler::BoxedHandler;
use crate::request::Request;
use crate::response::APPLICATION_JSON;

/// Marks every response passing through as `application/json`.
pub fn json_content_type(next: BoxedHandler) -> BoxedHandler {
    BoxedHandler::new(move |req: Request| {
        let next = next.clone();
        async move {
            let mut res = next.call(req).await;
            res.headers_mut().insert(CONTENT_TYPE, APPLICATION_JSON);
            res
        }
    })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use super::*;

    #[tokio::test]
    async fn overrides_body_less_responses_too() {
        let handler = json_content_type(BoxedHandler::new(|_req: Request| async {
            StatusCode::UNAUTHORIZED
        }));
        let req = Request::from(http::Request::get("/").body(Bytes::new()).unwrap());
        let res = handler.call(req).await;
        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(res.headers().get_all(CONTENT_TYPE).iter().count(), 1);
    }
}
