//! Error types for movie operations and their HTTP mapping.

use std::error::Error;
use std::fmt;

use serde_json::{json, Value};

use crate::store::StoreError;
use crate::validation::ValidationErrors;

/// Message returned to clients when a movie does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Movie not found";

/// Error type for movie operations.
#[derive(Debug)]
pub enum ApiError {
    /// Payload failed schema validation.
    Validation(ValidationErrors),
    /// No movie with the requested identifier.
    NotFound(String),
    /// Storage failure.
    Store(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => write!(f, "{}", errors),
            ApiError::NotFound(id) => write!(f, "movie not found: {}", id),
            ApiError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Validation(e) => Some(e),
            ApiError::Store(e) => Some(e),
            ApiError::NotFound(_) => None,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 422,
            ApiError::NotFound(_) => 404,
            ApiError::Store(_) => 500,
        }
    }

    /// JSON body sent to the client.
    ///
    /// Validation failures carry the field errors under `error`; everything
    /// else is a single `message`.
    pub fn body(&self) -> Value {
        match self {
            ApiError::Validation(errors) => json!({ "error": errors }),
            ApiError::NotFound(_) => json!({ "message": NOT_FOUND_MESSAGE }),
            ApiError::Store(_) => json!({ "message": "Internal Server Error" }),
        }
    }
}

#[cfg(feature = "http")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        if let ApiError::Store(e) = &self {
            tracing::error!(error = %e, "movie store failure");
        }
        (status, axum::Json(self.body())).into_response()
    }
}
