use std::collections::HashMap;
use std::future::Future;
use std::sync::{PoisonError, RwLock};

use super::Movie;
use crate::error::{Error, Kind};

/// Persistence for movies, keyed by external id.
///
/// Implementations must be safe to share across concurrent requests.
pub trait MovieStore: Send + Sync + 'static {
    /// # Errors
    ///
    /// `Conflict` if the external id is taken.
    fn create(&self, movie: &Movie) -> impl Future<Output = Result<(), Error>> + Send;

    /// # Errors
    ///
    /// `NotFound` if no movie has this external id.
    fn find(&self, external_id: &str) -> impl Future<Output = Result<Movie, Error>> + Send;

    fn find_all(&self) -> impl Future<Output = Result<Vec<Movie>, Error>> + Send;

    /// # Errors
    ///
    /// `NotFound` if the movie no longer exists.
    fn update(&self, movie: &Movie) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes and returns the movie.
    ///
    /// # Errors
    ///
    /// `NotFound` if no movie has this external id.
    fn delete(&self, external_id: &str) -> impl Future<Output = Result<Movie, Error>> + Send;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    movies: RwLock<HashMap<String, Movie>>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> Error {
    Error::new(Kind::Database, "movie store lock poisoned")
}

fn not_found(external_id: &str) -> Error {
    Error::not_found(format!("no movie with external id {external_id}")).with_param("extlID")
}

impl MovieStore for InMemoryMovieStore {
    async fn create(&self, movie: &Movie) -> Result<(), Error> {
        let mut movies = self.movies.write().map_err(poisoned)?;
        if movies.contains_key(&movie.external_id) {
            return Err(Error::new(Kind::Conflict, "a movie with this external id already exists")
                .with_param("external_id"));
        }
        movies.insert(movie.external_id.clone(), movie.clone());
        Ok(())
    }

    async fn find(&self, external_id: &str) -> Result<Movie, Error> {
        let movies = self.movies.read().map_err(poisoned)?;
        movies.get(external_id).cloned().ok_or_else(|| not_found(external_id))
    }

    async fn find_all(&self) -> Result<Vec<Movie>, Error> {
        let movies = self.movies.read().map_err(poisoned)?;
        let mut all: Vec<Movie> = movies.values().cloned().collect();
        all.sort_by_key(|m| m.id);
        Ok(all)
    }

    async fn update(&self, movie: &Movie) -> Result<(), Error> {
        let mut movies = self.movies.write().map_err(poisoned)?;
        let slot = movies
            .get_mut(&movie.external_id)
            .ok_or_else(|| not_found(&movie.external_id))?;
        *slot = movie.clone();
        Ok(())
    }

    async fn delete(&self, external_id: &str) -> Result<Movie, Error> {
        let mut movies = self.movies.write().map_err(poisoned)?;
        movies.remove(external_id).ok_or_else(|| not_found(external_id))
    }
}
