//! Seed fixture loading.

use std::path::Path;

use super::StoreError;
use crate::movie::Movie;

const BUNDLED_SEED: &str = include_str!("../../data/movies.json");

/// The movies bundled with the crate.
pub fn seed_movies() -> Result<Vec<Movie>, StoreError> {
    parse_seed(BUNDLED_SEED)
}

/// Parse a JSON array of movie records.
pub fn parse_seed(json: &str) -> Result<Vec<Movie>, StoreError> {
    serde_json::from_str(json).map_err(|e| StoreError::Seed(e.to_string()))
}

/// Read a seed fixture from disk.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<Movie>, StoreError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| StoreError::Seed(format!("failed to read {}: {}", path.display(), e)))?;
    parse_seed(&json)
}
