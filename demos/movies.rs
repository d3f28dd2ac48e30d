//! Movie API demo: ping plus the five movie routes on an in-memory store.
//!
//! Run with:
//!   GANTRY_LOG_FORMAT=pretty cargo run --example movies
//!
//! Try:
//!   curl http://localhost:8080/api/v1/ping
//!   curl -X POST http://localhost:8080/api/v1/movies \
//!        -H 'authorization: Bearer demo-token' \
//!        -d '{"title":"Repo Man","rated":"R","release_date":"1984-03-02T00:00:00Z",
//!             "run_time":92,"director":"Alex Cox","writer":"Alex Cox"}'
//!   curl http://localhost:8080/api/v1/movies -H 'authorization: Bearer demo-token'

use gantry::middleware::{self, Chain};
use gantry::movie::{self, InMemoryMovieStore, MovieHandlers};
use gantry::{
    Authorizer, Clock, Config, Error, Logger, Router, Server, StaticTokenConverter,
    StringGenerator, User, health,
};
use http::Method;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    let logger = Logger::from_config(&config)?;
    logger.install_global()?;

    let converter = StaticTokenConverter::new().with_user(
        "demo-token",
        User {
            email: "otto@example.com".into(),
            first_name: "Otto".into(),
            last_name: "Maddox".into(),
        },
    );
    let handlers = MovieHandlers {
        converter,
        authorizer: Authorizer::PermitAll,
        generator: StringGenerator::default(),
        clock: Clock::System,
        store: InMemoryMovieStore::new(),
    };

    let public = middleware::logger_chain(logger.clone(), Chain::new())
        .append(middleware::json_content_type);
    let authed = middleware::standard_chain(logger);

    let app = Router::new().on(Method::GET, health::PING_PATH, public.then(health::ping));
    let app = movie::routes(handlers, &authed, app);

    Server::bind(config.addr).serve(app).await
}
