//! Bearer-token gate.

use http::header::AUTHORIZATION;

use crate::context::{AccessToken, TokenType};
use crate::error::Error;
use crate::handler::BoxedHandler;
use crate::request::Request;
use crate::response::IntoResponse;

/// Pulls the bearer token from `Authorization` into the request context.
///
/// The header must start with exactly `Bearer ` (case-sensitive) and leave a
/// non-empty token after the prefix is removed once. Anything else ends the
/// chain with a bodyless `401`; the next handler is never called.
pub fn access_token(next: BoxedHandler) -> BoxedHandler {
    BoxedHandler::new(move |mut req: Request| {
        let next = next.clone();
        async move {
            match extract(&req) {
                Ok(token) => {
                    req.extensions_mut().insert(token);
                    next.call(req).await
                }
                Err(e) => e.into_response(),
            }
        }
    })
}

fn extract(req: &Request) -> Result<AccessToken, Error> {
    let header = req
        .header(AUTHORIZATION.as_str())
        .ok_or_else(|| Error::unauthenticated("Unauthenticated - missing Authorization header"))?;

    let token_type = TokenType::Bearer;
    let token = header
        .strip_prefix(token_type.prefix())
        .ok_or_else(|| Error::unauthenticated("Unauthenticated - Authorization scheme is not Bearer"))?;

    if token.is_empty() {
        return Err(Error::unauthenticated("Unauthenticated - empty Bearer token"));
    }

    Ok(AccessToken::new(token, token_type))
}
