//! movies_api — a small JSON HTTP API over an in-memory movie collection.
//!
//! - [`MovieService`] implements list / get / create / update / delete over
//!   any [`MovieStore`], validating payloads with [`validate_movie`] and
//!   [`validate_partial_movie`].
//! - [`InMemoryMovieStore`] keeps records in insertion order, seeded from a
//!   bundled JSON fixture.
//! - [`http`] (feature `http`, on by default) exposes the service over axum
//!   with an origin allow-list.

mod config;
mod error;
mod movie;
pub mod observability;
mod service;
mod store;
mod validation;

#[cfg(feature = "http")]
pub mod http;

pub use config::{Config, ConfigError, CorsConfig, DEFAULT_ALLOWED_ORIGINS, DEFAULT_PORT};
pub use error::{ApiError, NOT_FOUND_MESSAGE};
pub use movie::{Genre, Movie, MovieId};
pub use service::MovieService;
pub use store::{
    load_seed_file, parse_seed, seed_movies, InMemoryMovieStore, MovieStore, StoreError,
};
pub use validation::{
    validate_movie, validate_partial_movie, ErrorCode, FieldError, MoviePatch, NewMovie,
    PathSegment, ValidationErrors,
};
