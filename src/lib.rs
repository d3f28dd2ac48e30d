//! # gantry
//!
//! A small HTTP request pipeline for JSON APIs behind a reverse proxy.
//!
//! Every request runs through an ordered [`Chain`] of middleware before it
//! reaches its terminal handler:
//!
//! - **Context enricher**: assigns a request id, opens a per-request span,
//!   echoes the id in the `Request-Id` header and writes one access-log line.
//! - **JSON content type**: stamps `Content-Type: application/json` on the
//!   response.
//! - **Access token**: requires `Authorization: Bearer <token>` and stores
//!   the token for the handler; anything else is answered `401` without
//!   touching the handler.
//!
//! Handlers return `Result<T, Error>`. Successes are wrapped in a
//! [`StandardResponse`] envelope; failures become a status derived from the
//! error [`Kind`] and a body that never leaks internal detail.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use gantry::middleware::{self, Chain};
//! use gantry::{Config, Error, Logger, Request, Router, Server, StandardResponse};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let config = Config::from_env()?;
//!     let logger = Logger::from_config(&config)?;
//!     logger.install_global()?;
//!
//!     let chain = middleware::standard_chain(logger);
//!     let app = Router::new().on(http::Method::GET, "/api/v1/whoami", chain.then(whoami));
//!
//!     Server::bind(config.addr).serve(app).await
//! }
//!
//! async fn whoami(req: Request) -> Result<StandardResponse<String>, Error> {
//!     let token = req.access_token().map(|t| t.token().to_owned()).unwrap_or_default();
//!     StandardResponse::new(&req, token)
//! }
//! ```

mod auth;
mod clock;
mod config;
mod context;
mod decode;
mod envelope;
mod error;
mod handler;
mod logger;
mod random;
mod request;
mod response;
mod router;
mod server;

pub mod health;
pub mod middleware;
pub mod movie;

pub use auth::{AccessTokenConverter, Authorizer, StaticTokenConverter, User};
pub use clock::Clock;
pub use crate::config::{Config, LogFormat};
pub use context::{AccessToken, RequestId, RequestLogger, TokenType};
pub use decode::{DecodeError, EMPTY_BODY_MESSAGE, MALFORMED_JSON_MESSAGE, classify, decode_json};
pub use envelope::StandardResponse;
pub use error::{Cause, Error, INTERNAL_MESSAGE, Kind};
pub use handler::{BoxFuture, BoxedHandler, Handler};
pub use logger::Logger;
pub use middleware::Chain;
pub use random::StringGenerator;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::{DEFAULT_MAX_BODY_BYTES, Server};
