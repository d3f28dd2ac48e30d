//! Typed request-context values.
//!
//! Each value lives in the request's [`http::Extensions`] under its own type,
//! so a lookup can only ever find what the matching middleware stored. Read
//! them through the accessors on [`Request`](crate::Request).

use std::fmt;

use tracing::Span;
use uuid::Uuid;

/// Correlation identifier for one request.
///
/// A UUIDv7: time-ordered with 74 random bits, so collisions within a
/// process lifetime are not a practical concern. Generated once by the
/// context enricher and never replaced.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The per-request logger: a span carrying the request id and client fields.
#[derive(Clone, Debug)]
pub struct RequestLogger(pub(crate) Span);

impl RequestLogger {
    pub fn span(&self) -> &Span { &self.0 }
}

/// Authorization scheme of an [`AccessToken`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenType {
    Bearer,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bearer => "Bearer",
        }
    }

    /// The exact header prefix for this scheme, trailing space included.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Bearer => "Bearer ",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw credential taken from the `Authorization` header.
#[derive(Clone, Eq, PartialEq)]
pub struct AccessToken {
    token: String,
    token_type: TokenType,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, token_type: TokenType) -> Self {
        Self { token: token.into(), token_type }
    }

    pub fn token(&self) -> &str { &self.token }
    pub fn token_type(&self) -> TokenType { self.token_type }

    /// The header value this token was read from.
    pub fn auth_header(&self) -> String {
        format!("{}{}", self.token_type.prefix(), self.token)
    }
}

// Tokens stay out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_distinct() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 36);
    }

    #[test]
    fn debug_redacts_token() {
        let token = AccessToken::new("abc123def1", TokenType::Bearer);
        assert!(!format!("{token:?}").contains("abc123def1"));
        assert_eq!(token.auth_header(), "Bearer abc123def1");
    }
}
