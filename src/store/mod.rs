//! Movie storage.
//!
//! `MovieStore` is the seam the HTTP layer talks to; `InMemoryMovieStore` is
//! the process-local implementation, seeded from a JSON fixture at startup.
//!
//! ## Example
//!
//! ```
//! use movies_api::{InMemoryMovieStore, MovieStore};
//!
//! let store = InMemoryMovieStore::seeded().unwrap();
//! let dramas = store.list(Some("drama")).unwrap();
//! assert!(dramas.iter().all(|m| m.has_genre("Drama")));
//! ```

mod in_memory;
mod movie_store;
mod seed;

use std::fmt;

use crate::movie::MovieId;

/// Error type for movie store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A lock guarding the collection was poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// An identifier is already present in the store.
    DuplicateId(MovieId),
    /// The seed fixture could not be read or parsed.
    Seed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "movie store lock poisoned during {}", operation)
            }
            StoreError::DuplicateId(id) => write!(f, "duplicate movie id {}", id),
            StoreError::Seed(message) => write!(f, "seed error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

pub use in_memory::InMemoryMovieStore;
pub use movie_store::MovieStore;
pub use seed::{load_seed_file, parse_seed, seed_movies};
