//! HTTP transport — maps REST requests onto a [`MovieService`].
//!
//! Requires the `http` feature. Uses axum for routing and tower-http for
//! CORS and request tracing.
//!
//! ## Routes
//!
//! - `GET /movies?genre=X` — list, optionally filtered by genre.
//! - `GET /movies/:id` — one movie, or 404.
//! - `POST /movies` — create (201), or 422 with field errors.
//! - `PATCH /movies/:id` — partial update, 422 or 404 on failure.
//! - `DELETE /movies/:id` — delete, or 404.
//! - `OPTIONS *` — CORS preflight.
//! - `GET /health` — `{ "ok": true, "movies": <count> }`.
//!
//! A trailing slash is accepted on every route (`/movies/` lists movies).
//! Anything else answers `404` with the plain-text body `Error 404`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use movies_api::{http, Config, InMemoryMovieStore, MovieService};
//!
//! let service = Arc::new(MovieService::new(InMemoryMovieStore::seeded()?));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone(), &Config::default().cors);
//!
//! // Or serve directly
//! http::serve(service, &Config::default()).await?;
//! ```

mod cors;
mod handlers;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, MethodRouter};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{Config, CorsConfig};
use crate::service::MovieService;
use crate::store::MovieStore;

pub use cors::{cors_layer, preflight_gate};

type ServiceState<S> = Arc<MovieService<S>>;

/// Build an axum `Router` serving the movie API from the given service.
pub fn router<S: MovieStore + 'static>(service: Arc<MovieService<S>>, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health::<S>))
        .route("/health/", get(handlers::health::<S>))
        .route("/movies", collection_routes::<S>())
        .route("/movies/", collection_routes::<S>())
        .route("/movies/:id", item_routes::<S>())
        .route("/movies/:id/", item_routes::<S>())
        .fallback(handlers::not_found)
        // Order matters: the preflight gate must see the CORS headers.
        .layer(cors_layer(cors))
        .layer(middleware::from_fn(preflight_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

fn collection_routes<S: MovieStore + 'static>() -> MethodRouter<ServiceState<S>> {
    get(handlers::list_movies::<S>)
        .post(handlers::create_movie::<S>)
        .fallback(handlers::not_found)
}

fn item_routes<S: MovieStore + 'static>() -> MethodRouter<ServiceState<S>> {
    get(handlers::get_movie::<S>)
        .patch(handlers::update_movie::<S>)
        .delete(handlers::delete_movie::<S>)
        .fallback(handlers::not_found)
}

/// Serve the movie API at `config.bind_addr()` until Ctrl-C.
pub async fn serve<S: MovieStore + 'static>(
    service: Arc<MovieService<S>>,
    config: &Config,
) -> Result<(), std::io::Error> {
    let app = router(service, &config.cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        "Server listening on port http://localhost:{}",
        config.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
