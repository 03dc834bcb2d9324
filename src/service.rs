//! MovieService — the five movie operations over an injectable store.
//!
//! `MovieService<S>` owns its store, so every server instance (and every
//! test) gets its own collection. HTTP handlers are thin wrappers around
//! these methods.
//!
//! ## Example
//!
//! ```
//! use movies_api::{InMemoryMovieStore, MovieService};
//! use serde_json::json;
//!
//! let service = MovieService::new(InMemoryMovieStore::new());
//! let created = service
//!     .create(&json!({
//!         "title": "Alien",
//!         "year": 1979,
//!         "director": "Ridley Scott",
//!         "duration": 117,
//!         "poster": "https://example.com/alien.jpg",
//!         "genre": ["Horror", "Sci-Fi"]
//!     }))
//!     .unwrap();
//! assert_eq!(service.get(&created.id.to_string()).unwrap(), created);
//! ```

use serde_json::Value;

use crate::error::ApiError;
use crate::movie::{Movie, MovieId};
use crate::store::MovieStore;
use crate::validation::{validate_movie, validate_partial_movie};

/// Movie CRUD operations backed by a store `S`.
pub struct MovieService<S> {
    store: S,
}

impl<S: MovieStore> MovieService<S> {
    /// Create a new service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All movies, or only those tagged with `genre`. An empty filter is
    /// treated as no filter.
    pub fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>, ApiError> {
        let genre = genre.filter(|g| !g.is_empty());
        Ok(self.store.list(genre)?)
    }

    /// Look up a movie by its textual identifier.
    pub fn get(&self, id: &str) -> Result<Movie, ApiError> {
        let movie_id = parse_id(id)?;
        self.store
            .get(&movie_id)?
            .ok_or_else(|| not_found(id))
    }

    /// Validate `input` as a full movie, assign a fresh identifier and store it.
    pub fn create(&self, input: &Value) -> Result<Movie, ApiError> {
        let new_movie = validate_movie(input)?;
        let movie = self.store.insert(new_movie.into_movie(MovieId::new()))?;
        tracing::info!(id = %movie.id, title = %movie.title, "movie created");
        Ok(movie)
    }

    /// Remove a movie.
    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let movie_id = parse_id(id)?;
        if !self.store.delete(&movie_id)? {
            return Err(not_found(id));
        }
        tracing::info!(id = %movie_id, "movie deleted");
        Ok(())
    }

    /// Validate `input` as a partial movie and merge it over the stored one.
    ///
    /// The payload is validated before the lookup, so a bad body on an
    /// unknown id reports the validation errors.
    pub fn update(&self, id: &str, input: &Value) -> Result<Movie, ApiError> {
        let patch = validate_partial_movie(input)?;
        let movie_id = parse_id(id)?;
        let movie = self
            .store
            .update(&movie_id, patch)?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id = %movie.id, "movie updated");
        Ok(movie)
    }

    /// Number of stored movies.
    pub fn count(&self) -> Result<usize, ApiError> {
        Ok(self.store.len()?)
    }
}

/// Identifiers that are not UUIDs cannot name a stored movie.
fn parse_id(id: &str) -> Result<MovieId, ApiError> {
    id.parse().map_err(|_| not_found(id))
}

fn not_found(id: &str) -> ApiError {
    tracing::debug!(id = %id, "movie not found");
    ApiError::NotFound(id.to_string())
}
