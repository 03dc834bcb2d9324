//! `movies-api` binary entrypoint.
//!
//! Loads configuration from environment variables, seeds the store and
//! starts the HTTP server.

use std::sync::Arc;

use anyhow::Result;

use movies_api::observability::init_logging;
use movies_api::{http, load_seed_file, seed_movies, Config, InMemoryMovieStore, MovieService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(config.log_format);

    let movies = match &config.seed_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading seed fixture");
            load_seed_file(path)?
        }
        None => seed_movies()?,
    };
    tracing::info!(movies = movies.len(), "store seeded");

    let store = InMemoryMovieStore::with_movies(movies)?;
    let service = Arc::new(MovieService::new(store));

    http::serve(service, &config).await?;
    Ok(())
}
