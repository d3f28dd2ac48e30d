//! Movie resource: domain type, store, and terminal handlers.
//!
//! This is the demonstration resource the pipeline wraps. A movie has an
//! internal key ([`Movie::id`]) that never leaves the process and an
//! external id that clients use in URLs.

mod handlers;
mod store;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::error::{Error, Kind};

pub use handlers::{DeleteMovieResponse, MOVIES_PATH, MovieHandlers, routes};
pub use store::{InMemoryMovieStore, MovieStore};

/// A stored movie.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Movie {
    pub id: Uuid,
    pub external_id: String,
    pub title: String,
    pub rated: String,
    pub released: DateTime<Utc>,
    pub run_time: u32,
    pub director: String,
    pub writer: String,
    pub create_username: String,
    pub create_timestamp: DateTime<Utc>,
    pub update_username: String,
    pub update_timestamp: DateTime<Utc>,
}

/// Client-supplied fields for create and update.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MovieRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub rated: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub run_time: i64,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub writer: String,
}

/// Validated fields, ready to apply to a [`Movie`].
struct MovieFields {
    title: String,
    rated: String,
    released: DateTime<Utc>,
    run_time: u32,
    director: String,
    writer: String,
}

impl MovieRequest {
    fn validate(self) -> Result<MovieFields, Error> {
        required("title", &self.title)?;
        required("rated", &self.rated)?;
        required("director", &self.director)?;
        required("writer", &self.writer)?;

        let released = DateTime::parse_from_rfc3339(&self.release_date)
            .map_err(|e| {
                Error::new(Kind::Validation, "release_date must be an RFC 3339 timestamp")
                    .with_param("release_date")
                    .with_source(e)
            })?
            .with_timezone(&Utc);

        let run_time = u32::try_from(self.run_time)
            .ok()
            .filter(|&minutes| minutes > 0)
            .ok_or_else(|| {
                Error::new(Kind::Validation, "run_time must be greater than zero")
                    .with_param("run_time")
            })?;

        Ok(MovieFields {
            title: self.title,
            rated: self.rated,
            released,
            run_time,
            director: self.director,
            writer: self.writer,
        })
    }
}

fn required(param: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::new(Kind::Validation, format!("{param} is required")).with_param(param));
    }
    Ok(())
}

impl Movie {
    /// A new movie created by `user` at `now`.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the first bad field.
    pub fn create(
        external_id: String,
        req: MovieRequest,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let f = req.validate()?;
        Ok(Self {
            id: Uuid::now_v7(),
            external_id,
            title: f.title,
            rated: f.rated,
            released: f.released,
            run_time: f.run_time,
            director: f.director,
            writer: f.writer,
            create_username: user.email.clone(),
            create_timestamp: now,
            update_username: user.email.clone(),
            update_timestamp: now,
        })
    }

    /// Replaces the client-editable fields and stamps the update audit fields.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the first bad field; `self` is
    /// left untouched.
    pub fn update(&mut self, req: MovieRequest, user: &User, now: DateTime<Utc>) -> Result<(), Error> {
        let f = req.validate()?;
        self.title = f.title;
        self.rated = f.rated;
        self.released = f.released;
        self.run_time = f.run_time;
        self.director = f.director;
        self.writer = f.writer;
        self.update_username = user.email.clone();
        self.update_timestamp = now;
        Ok(())
    }
}

/// The client view of a [`Movie`]. The internal key is not part of it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MovieResponse {
    pub external_id: String,
    pub title: String,
    pub rated: String,
    pub release_date: String,
    pub run_time: u32,
    pub director: String,
    pub writer: String,
    pub create_username: String,
    pub create_timestamp: String,
    pub update_username: String,
    pub update_timestamp: String,
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<&Movie> for MovieResponse {
    fn from(m: &Movie) -> Self {
        Self {
            external_id: m.external_id.clone(),
            title: m.title.clone(),
            rated: m.rated.clone(),
            release_date: timestamp(&m.released),
            run_time: m.run_time,
            director: m.director.clone(),
            writer: m.writer.clone(),
            create_username: m.create_username.clone(),
            create_timestamp: timestamp(&m.create_timestamp),
            update_username: m.update_username.clone(),
            update_timestamp: timestamp(&m.update_timestamp),
        }
    }
}
