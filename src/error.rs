//! Classified errors and their mapping onto HTTP responses.
//!
//! Every failure that reaches the edge of the pipeline is an [`Error`]: a
//! [`Kind`] drawn from a fixed taxonomy, a human-readable message, and an
//! optional lower-level cause. The kind alone decides the status code and
//! the shape of the response body:
//!
//! | Kind | Status | Body |
//! |---|---|---|
//! | `Unauthenticated` | 401 | empty |
//! | `Unauthorized` | 403 | empty |
//! | `InvalidRequest`, `Validation` | 400 | JSON |
//! | `NotFound` | 404 | JSON |
//! | `Conflict` | 409 | JSON |
//! | anything else | 500 | JSON, generic message |
//!
//! The full error, cause chain included, is logged through the request's
//! span before the response is produced. Clients of a 500 only ever see
//! [`INTERNAL_MESSAGE`].

use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::response::{IntoResponse, Response};

/// Boxed lower-level cause carried by an [`Error`].
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// The message returned to clients for every 500-class error.
pub const INTERNAL_MESSAGE: &str = "Unexpected error - contact support";

/// The classification of an [`Error`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Unclassified. The default for wrapped errors.
    #[default]
    Other,
    Internal,
    Database,
    Io,
    InvalidRequest,
    Validation,
    NotFound,
    Conflict,
    /// Missing or bad credential.
    Unauthenticated,
    /// Valid credential, forbidden action.
    Unauthorized,
}

impl Kind {
    /// HTTP status for this kind.
    pub fn status(self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::InvalidRequest | Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Other | Self::Internal | Self::Database | Self::Io => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Internal => "internal",
            Self::Database => "database",
            Self::Io => "io",
            Self::InvalidRequest => "invalid_request",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unauthenticated => "unauthenticated",
            Self::Unauthorized => "unauthorized",
        }
    }

    /// Auth failures answer with a bare status line.
    fn has_body(self) -> bool {
        !matches!(self, Self::Unauthenticated | Self::Unauthorized)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified error.
///
/// Build one at the point of failure and return it; nothing downstream
/// mutates or retries it.
///
/// ```rust
/// use gantry::{Error, Kind};
///
/// let err = Error::new(Kind::Validation, "title is required").with_param("title");
/// assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    kind: Kind,
    code: Option<String>,
    param: Option<String>,
    message: String,
    #[source]
    source: Option<Cause>,
}

impl Error {
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self { kind, code: None, param: None, message: message.into(), source: None }
    }

    /// Wraps a lower-level error. The message is taken from the cause.
    pub fn wrap(kind: Kind, cause: impl Into<Cause>) -> Self {
        let cause = cause.into();
        Self {
            kind,
            code: None,
            param: None,
            message: cause.to_string(),
            source: Some(cause),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(Kind::Unauthenticated, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(Kind::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Kind::Internal, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Kind::NotFound, message)
    }

    /// Attaches a machine-readable code, echoed in the JSON error body.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Names the request parameter the error is about.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn with_source(mut self, cause: impl Into<Cause>) -> Self {
        self.source = Some(cause.into());
        self
    }

    pub fn kind(&self) -> Kind { self.kind }
    pub fn message(&self) -> &str { &self.message }
    pub fn code(&self) -> Option<&str> { self.code.as_deref() }
    pub fn param(&self) -> Option<&str> { self.param.as_deref() }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// The message and every cause beneath it, joined with `": "`.
    pub fn chain(&self) -> String {
        let mut out = self.message.clone();
        let mut last = self.message.clone();
        let mut next = self.source.as_deref().map(|e| e as &(dyn StdError + 'static));
        while let Some(cause) = next {
            let text = cause.to_string();
            // `wrap` copies the cause's text into the message
            if text != last {
                out.push_str(": ");
                out.push_str(&text);
            }
            last = text;
            next = cause.source();
        }
        out
    }

    fn body(&self) -> ErrorBody<'_> {
        if self.status().is_server_error() {
            return ErrorBody {
                error: ErrorDetail {
                    kind: Kind::Internal,
                    code: None,
                    param: None,
                    message: INTERNAL_MESSAGE,
                },
            };
        }
        ErrorBody {
            error: ErrorDetail {
                kind: self.kind,
                code: self.code.as_deref(),
                param: self.param.as_deref(),
                message: &self.message,
            },
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    kind: Kind,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    param: Option<&'a str>,
    message: &'a str,
}

/// Logs the error on the current span and maps it to a response.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(
            kind = %self.kind,
            status = status.as_u16(),
            code = self.code.as_deref(),
            param = self.param.as_deref(),
            cause = %self.chain(),
            "request failed"
        );

        if !self.kind.has_body() {
            return Response::status(status);
        }
        match serde_json::to_vec(&self.body()) {
            Ok(bytes) => Response::builder().status(status).json(bytes),
            Err(e) => {
                error!("encode error body: {e}");
                Response::status(status)
            }
        }
    }
}

// ── Infrastructure conversions ────────────────────────────────────────────────

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::wrap(Kind::Io, e)
    }
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Self::wrap(Kind::Internal, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(res: &Response) -> serde_json::Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[test]
    fn status_per_kind() {
        assert_eq!(Kind::Unauthenticated.status(), 401);
        assert_eq!(Kind::Unauthorized.status(), 403);
        assert_eq!(Kind::InvalidRequest.status(), 400);
        assert_eq!(Kind::Validation.status(), 400);
        assert_eq!(Kind::NotFound.status(), 404);
        assert_eq!(Kind::Conflict.status(), 409);
        assert_eq!(Kind::Internal.status(), 500);
        assert_eq!(Kind::Database.status(), 500);
        assert_eq!(Kind::Other.status(), 500);
    }

    #[test]
    fn auth_failures_have_empty_body() {
        let res = Error::unauthenticated("Unauthenticated - empty Bearer token").into_response();
        assert_eq!(res.status_code(), 401);
        assert!(res.body().is_empty());

        let res = Error::unauthorized("nope").into_response();
        assert_eq!(res.status_code(), 403);
        assert!(res.body().is_empty());
    }

    #[test]
    fn client_errors_carry_json_detail() {
        let res = Error::new(Kind::Validation, "title is required")
            .with_param("title")
            .into_response();
        assert_eq!(res.status_code(), 400);
        assert_eq!(res.headers()[http::header::CONTENT_TYPE], "application/json");
        let body = body_json(&res);
        assert_eq!(body["error"]["kind"], "validation");
        assert_eq!(body["error"]["param"], "title");
        assert_eq!(body["error"]["message"], "title is required");
        assert!(body["error"].get("code").is_none());
    }

    #[test]
    fn server_errors_hide_internal_text() {
        let res = Error::new(Kind::Database, "connection refused on 10.0.0.7:5432").into_response();
        assert_eq!(res.status_code(), 500);
        let body = body_json(&res);
        assert_eq!(body["error"]["kind"], "internal");
        assert_eq!(body["error"]["message"], INTERNAL_MESSAGE);
        assert!(!String::from_utf8_lossy(res.body()).contains("10.0.0.7"));
    }

    #[test]
    fn wrap_preserves_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = Error::wrap(Kind::Io, io);
        assert_eq!(err.message(), "pipe closed");
        assert!(err.source().is_some());
        assert_eq!(err.kind(), Kind::Io);
    }

    #[test]
    fn chain_joins_distinct_causes() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = Error::internal("could not save movie").with_source(io);
        assert_eq!(err.chain(), "could not save movie: disk full");
    }
}
