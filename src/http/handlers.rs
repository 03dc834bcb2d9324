//! Request handlers. Each one unpacks the request, calls the service and
//! shapes the response.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::movie::Movie;
use crate::service::MovieService;
use crate::store::MovieStore;

type AppState<S> = State<Arc<MovieService<S>>>;

#[derive(Debug, Deserialize)]
pub(super) struct ListParams {
    genre: Option<String>,
}

/// `GET /movies?genre=X`
pub(super) async fn list_movies<S: MovieStore + 'static>(
    State(service): AppState<S>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    service.list(params.genre.as_deref()).map(Json)
}

/// `GET /movies/:id`
pub(super) async fn get_movie<S: MovieStore + 'static>(
    State(service): AppState<S>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    service.get(&id).map(Json)
}

/// `POST /movies`
pub(super) async fn create_movie<S: MovieStore + 'static>(
    State(service): AppState<S>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let input = match json_body(body) {
        Ok(input) => input,
        Err(rejection) => return rejection.into_response(),
    };
    match service.create(&input) {
        Ok(movie) => (StatusCode::CREATED, Json(movie)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `PATCH /movies/:id`
pub(super) async fn update_movie<S: MovieStore + 'static>(
    State(service): AppState<S>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let input = match json_body(body) {
        Ok(input) => input,
        Err(rejection) => return rejection.into_response(),
    };
    match service.update(&id, &input) {
        Ok(movie) => Json(movie).into_response(),
        Err(e) => e.into_response(),
    }
}

/// A body sent without a JSON content type reads as an empty object, so it
/// goes through validation like any other payload. Malformed JSON is still
/// rejected by the extractor.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, JsonRejection> {
    match body {
        Ok(Json(input)) => Ok(input),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Map::new())),
        Err(rejection) => Err(rejection),
    }
}

/// `DELETE /movies/:id`
pub(super) async fn delete_movie<S: MovieStore + 'static>(
    State(service): AppState<S>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    service.delete(&id)?;
    Ok(Json(json!({ "message": "Movie deleted" })))
}

/// `GET /health`
pub(super) async fn health<S: MovieStore + 'static>(
    State(service): AppState<S>,
) -> Result<Json<Value>, ApiError> {
    let movies = service.count()?;
    Ok(Json(json!({ "ok": true, "movies": movies })))
}

/// Fallback for unmatched routes and methods.
pub(super) async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Error 404")
}
