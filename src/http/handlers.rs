//! Route handlers. Each one validates, touches the store, and maps the
//! outcome to a status code.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::error::ApiError;
use crate::movie::{validate_full, validate_partial, Movie};
use crate::store::MovieStore;

#[derive(Debug, Default, Deserialize)]
pub struct RootQuery {
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub genre: Option<String>,
}

/// `GET /`: greeting, as JSON or as HTML with `?format=html`.
pub async fn root(Query(query): Query<RootQuery>) -> Response {
    if query.format.as_deref() == Some("html") {
        return Html("<h1>Hola mundo HTML!</h1>").into_response();
    }
    Json(json!({ "message": "hola mundo" })).into_response()
}

/// `GET /health`: returns `{ "ok": true, "movies": <count> }`.
pub async fn health<S: MovieStore>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError> {
    let count = store.len()?;
    Ok(Json(json!({ "ok": true, "movies": count })))
}

/// `GET /movies`: all movies, or those tagged with `?genre=` (case-insensitive).
///
/// A genre filter that matches nothing is a 404; an empty unfiltered list is not.
pub async fn list_movies<S: MovieStore>(
    State(store): State<Arc<S>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let genre = query.genre.filter(|g| !g.is_empty());
    let Some(genre) = genre else {
        return Ok(Json(store.list(None)?));
    };

    let matches_genre = |movie: &Movie| movie.has_genre(&genre);
    let movies = store.list(Some(&matches_genre))?;
    if movies.is_empty() {
        warn!(genre = %genre, "no movies for genre");
        return Err(ApiError::genre_not_found(&genre));
    }
    debug!(genre = %genre, count = movies.len(), "listed movies by genre");
    Ok(Json(movies))
}

/// `GET /movies/:id`
pub async fn get_movie<S: MovieStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    match store.get(&id)? {
        Some(movie) => Ok(Json(movie)),
        None => {
            debug!(id = %id, "movie not found");
            Err(ApiError::movie_not_found(&id))
        }
    }
}

/// `POST /movies`: validate a full record, assign an id, append.
pub async fn create_movie<S: MovieStore>(
    State(store): State<Arc<S>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let Json(input) = payload?;
    let new_movie = validate_full(&input).map_err(|errors| {
        warn!(issues = errors.len(), "rejected movie");
        errors
    })?;

    let movie = store.insert(new_movie)?;
    info!(id = %movie.id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// `PATCH /movies/:id`: validate a partial record, then merge it.
///
/// Validation runs before the lookup, so a bad payload is a 400 even for an unknown id.
pub async fn update_movie<S: MovieStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Movie>, ApiError> {
    let Json(input) = payload?;
    let patch = validate_partial(&input).map_err(|errors| {
        warn!(id = %id, issues = errors.len(), "rejected movie patch");
        errors
    })?;

    match store.update(&id, patch)? {
        Some(movie) => {
            info!(id = %id, "movie updated");
            Ok(Json(movie))
        }
        None => {
            warn!(id = %id, "patch for unknown movie");
            Err(ApiError::movie_not_found(&id))
        }
    }
}

/// `DELETE /movies/:id`
pub async fn delete_movie<S: MovieStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !store.remove(&id)? {
        warn!(id = %id, "delete for unknown movie");
        return Err(ApiError::movie_not_found(&id));
    }
    info!(id = %id, "movie deleted");
    Ok(Json(json!({ "message": format!("Movie deleted {}", id) })))
}
