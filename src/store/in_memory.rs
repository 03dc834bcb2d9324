//! InMemoryMovieStore - Vec-backed movie store owned by the server instance.

use std::sync::{Arc, RwLock};

use super::{seed_movies, MovieStore, StoreError};
use crate::movie::{Movie, MovieId};
use crate::validation::MoviePatch;

/// In-memory movie store backed by a `Vec` in insertion order.
///
/// Clone-friendly via Arc; clones share the same collection. Each
/// `InMemoryMovieStore::new()` is an isolated instance.
#[derive(Clone, Default)]
pub struct InMemoryMovieStore {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl InMemoryMovieStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `movies`, rejecting duplicate identifiers.
    pub fn with_movies(movies: Vec<Movie>) -> Result<Self, StoreError> {
        let store = Self::new();
        for movie in movies {
            store.insert(movie)?;
        }
        Ok(store)
    }

    /// Create a store holding the bundled fixture.
    pub fn seeded() -> Result<Self, StoreError> {
        Self::with_movies(seed_movies()?)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Movie>>, StoreError> {
        self.movies
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Movie>>, StoreError> {
        self.movies
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))
    }
}

impl MovieStore for InMemoryMovieStore {
    fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>, StoreError> {
        let movies = self.read()?;
        Ok(match genre {
            Some(filter) => movies
                .iter()
                .filter(|movie| movie.has_genre(filter))
                .cloned()
                .collect(),
            None => movies.clone(),
        })
    }

    fn get(&self, id: &MovieId) -> Result<Option<Movie>, StoreError> {
        let movies = self.read()?;
        Ok(movies.iter().find(|movie| movie.id == *id).cloned())
    }

    fn insert(&self, movie: Movie) -> Result<Movie, StoreError> {
        let mut movies = self.write()?;
        if movies.iter().any(|existing| existing.id == movie.id) {
            return Err(StoreError::DuplicateId(movie.id));
        }
        movies.push(movie.clone());
        Ok(movie)
    }

    fn update(&self, id: &MovieId, patch: MoviePatch) -> Result<Option<Movie>, StoreError> {
        let mut movies = self.write()?;
        match movies.iter_mut().find(|movie| movie.id == *id) {
            Some(movie) => {
                patch.apply(movie);
                Ok(Some(movie.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, id: &MovieId) -> Result<bool, StoreError> {
        let mut movies = self.write()?;
        match movies.iter().position(|movie| movie.id == *id) {
            Some(index) => {
                movies.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }
}
