//! JSON request bodies and the classification of their decode failures.
//!
//! Two failures are common enough to get a fixed, client-facing message:
//!
//! - the body is empty (or only whitespace): `"Request Body cannot be empty"`
//! - the body stops mid-value: `"Malformed JSON"`
//!
//! Both are `InvalidRequest` (400). Any other decode failure is wrapped as
//! [`Kind::Other`] with the serde error kept as its cause.
//!
//! Only the first JSON value of a body is read; anything after it is ignored.

use serde::de::DeserializeOwned;
use serde_json::Deserializer;

use crate::error::{Error, Kind};

pub const EMPTY_BODY_MESSAGE: &str = "Request Body cannot be empty";
pub const MALFORMED_JSON_MESSAGE: &str = "Malformed JSON";

/// A low-level body decoding failure.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("request body is empty")]
    Empty,
    #[error("request body ended unexpectedly")]
    UnexpectedEof(#[source] serde_json::Error),
    #[error(transparent)]
    Json(serde_json::Error),
}

impl DecodeError {
    /// Sorts a serde failure on `body` into one of the three cases.
    pub fn from_json(body: &[u8], err: serde_json::Error) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            Self::Empty
        } else if err.is_eof() {
            Self::UnexpectedEof(err)
        } else {
            Self::Json(err)
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Empty => Error::new(Kind::InvalidRequest, EMPTY_BODY_MESSAGE),
            DecodeError::UnexpectedEof(e) => {
                Error::new(Kind::InvalidRequest, MALFORMED_JSON_MESSAGE).with_source(e)
            }
            DecodeError::Json(e) => Error::wrap(Kind::Other, e),
        }
    }
}

/// Classifies a decode outcome. No error in, no error out.
pub fn classify(err: Option<DecodeError>) -> Option<Error> {
    err.map(Error::from)
}

/// Decodes the first JSON value of a body, classifying any failure.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    match Deserializer::from_slice(body).into_iter::<T>().next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(DecodeError::from_json(body, e).into()),
        None => Err(DecodeError::Empty.into()),
    }
}
