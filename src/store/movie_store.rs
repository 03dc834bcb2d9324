//! MovieStore - Abstract storage for movie records.

use super::StoreError;
use crate::movie::{Movie, MovieId};
use crate::validation::MoviePatch;

/// Ordered storage of movie records.
///
/// Listing preserves insertion order. Implementations must keep identifiers
/// unique and must never change the identifier of a stored record.
pub trait MovieStore: Send + Sync {
    /// All movies, or only those tagged with `genre` (case-insensitive).
    fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>, StoreError>;

    /// Get a movie by ID. Returns None if not found.
    fn get(&self, id: &MovieId) -> Result<Option<Movie>, StoreError>;

    /// Append a new movie. Fails if its ID is already taken.
    fn insert(&self, movie: Movie) -> Result<Movie, StoreError>;

    /// Merge `patch` over the stored movie. Returns None if not found.
    fn update(&self, id: &MovieId, patch: MoviePatch) -> Result<Option<Movie>, StoreError>;

    /// Remove a movie by ID. Returns true if it existed.
    fn delete(&self, id: &MovieId) -> Result<bool, StoreError>;

    /// Number of stored movies.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
