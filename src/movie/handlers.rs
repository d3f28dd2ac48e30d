use std::sync::Arc;

use http::Method;
use serde::Serialize;
use tracing::info;

use super::{Movie, MovieRequest, MovieResponse, MovieStore};
use crate::auth::{AccessTokenConverter, Authorizer, User};
use crate::clock::Clock;
use crate::decode::decode_json;
use crate::envelope::StandardResponse;
use crate::error::{Error, Kind};
use crate::middleware::Chain;
use crate::random::StringGenerator;
use crate::request::Request;
use crate::router::Router;

/// Collection path; single movies live at `{MOVIES_PATH}/{extlID}`.
pub const MOVIES_PATH: &str = "/api/v1/movies";

/// The movie handlers and the collaborators they call.
pub struct MovieHandlers<C, S> {
    pub converter: C,
    pub authorizer: Authorizer,
    pub generator: StringGenerator,
    pub clock: Clock,
    pub store: S,
}

#[derive(Debug, Serialize)]
pub struct DeleteMovieResponse {
    pub external_id: String,
    pub deleted: bool,
}

impl<C, S> MovieHandlers<C, S>
where
    C: AccessTokenConverter,
    S: MovieStore,
{
    /// Resolves the caller and checks they may perform this request.
    async fn user(&self, req: &Request) -> Result<User, Error> {
        let token = req
            .access_token()
            .ok_or_else(|| Error::internal("access token not set to request context"))?;
        let user = self.converter.convert(token).await?;
        self.authorizer.authorize(&user, req.method(), req.path())?;
        Ok(user)
    }

    fn external_id(req: &Request) -> Result<&str, Error> {
        req.param("extlID").ok_or_else(|| {
            Error::new(Kind::InvalidRequest, "movie external id is required").with_param("extlID")
        })
    }

    pub async fn create(&self, req: Request) -> Result<StandardResponse<MovieResponse>, Error> {
        let user = self.user(&req).await?;
        let body: MovieRequest = decode_json(req.body())?;

        let movie = Movie::create(self.generator.generate(), body, &user, self.clock.now())?;
        self.store.create(&movie).await?;
        info!(external_id = %movie.external_id, "movie created");

        StandardResponse::new(&req, MovieResponse::from(&movie))
    }

    pub async fn find(&self, req: Request) -> Result<StandardResponse<MovieResponse>, Error> {
        self.user(&req).await?;
        let movie = self.store.find(Self::external_id(&req)?).await?;
        StandardResponse::new(&req, MovieResponse::from(&movie))
    }

    pub async fn find_all(&self, req: Request) -> Result<StandardResponse<Vec<MovieResponse>>, Error> {
        self.user(&req).await?;
        let movies = self.store.find_all().await?;
        StandardResponse::new(&req, movies.iter().map(MovieResponse::from).collect())
    }

    pub async fn update(&self, req: Request) -> Result<StandardResponse<MovieResponse>, Error> {
        let user = self.user(&req).await?;
        let body: MovieRequest = decode_json(req.body())?;

        let mut movie = self.store.find(Self::external_id(&req)?).await?;
        movie.update(body, &user, self.clock.now())?;
        self.store.update(&movie).await?;
        info!(external_id = %movie.external_id, "movie updated");

        StandardResponse::new(&req, MovieResponse::from(&movie))
    }

    pub async fn delete(&self, req: Request) -> Result<StandardResponse<DeleteMovieResponse>, Error> {
        self.user(&req).await?;
        let movie = self.store.delete(Self::external_id(&req)?).await?;
        info!(external_id = %movie.external_id, "movie deleted");

        let data = DeleteMovieResponse { external_id: movie.external_id, deleted: true };
        StandardResponse::new(&req, data)
    }
}

/// Registers the five movie routes on `router`, each behind `chain`.
pub fn routes<C, S>(handlers: MovieHandlers<C, S>, chain: &Chain, router: Router) -> Router
where
    C: AccessTokenConverter,
    S: MovieStore,
{
    let h = Arc::new(handlers);
    let item = format!("{MOVIES_PATH}/{{extlID}}");

    let create = Arc::clone(&h);
    let find = Arc::clone(&h);
    let find_all = Arc::clone(&h);
    let update = Arc::clone(&h);
    let delete = h;

    router
        .on(Method::POST, MOVIES_PATH, chain.then(move |req: Request| {
            let h = Arc::clone(&create);
            async move { h.create(req).await }
        }))
        .on(Method::GET, MOVIES_PATH, chain.then(move |req: Request| {
            let h = Arc::clone(&find_all);
            async move { h.find_all(req).await }
        }))
        .on(Method::GET, &item, chain.then(move |req: Request| {
            let h = Arc::clone(&find);
            async move { h.find(req).await }
        }))
        .on(Method::PUT, &item, chain.then(move |req: Request| {
            let h = Arc::clone(&update);
            async move { h.update(req).await }
        }))
        .on(Method::DELETE, &item, chain.then(move |req: Request| {
            let h = Arc::clone(&delete);
            async move { h.delete(req).await }
        }))
}
