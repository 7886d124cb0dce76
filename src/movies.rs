use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::{
    AppState,
    error::{ApiError, AppResult, StorageError},
    extract::{JsonBody, QueryParams},
    models::{ListQuery, MessageBody, Movie, MovieInput, MoviePatch, NameFilter},
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Option<JsonBody<MovieInput>>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let input = body.map(|JsonBody(input)| input).unwrap_or_default();
    let movie = input.validate(|| state.ids.next_id())?;
    let id = movie.id.clone();

    let created = state.movies.create(movie).await.map_err(|err| {
        let message = message_or(&err, "Some error occurred while creating the Movie.");
        ApiError::storage(message, err)
    })?;

    debug!(id = %id, "movie created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    QueryParams(q): QueryParams<ListQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let filter = NameFilter::new(q.name);
    let movies = state.movies.list(filter).await.map_err(|err| {
        let message = message_or(&err, "Some error occurred while retrieving movies.");
        ApiError::storage(message, err)
    })?;
    Ok(Json(movies))
}

/// Not-found is a 404 carrying a JSON `null`, not an error body.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<Option<Movie>>)> {
    let found = state
        .movies
        .get_by_id(&id)
        .await
        .map_err(|err| ApiError::storage(format!("Error retrieving Movie with id={id}"), err))?;

    let status = if found.is_some() { StatusCode::OK } else { StatusCode::NOT_FOUND };
    Ok((status, Json(found)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<JsonBody<MoviePatch>>,
) -> AppResult<Json<MessageBody>> {
    let patch = body.map(|JsonBody(patch)| patch).unwrap_or_default();
    let affected = state
        .movies
        .update(&id, patch)
        .await
        .map_err(|err| ApiError::storage(format!("Error updating Movie with id={id}"), err))?;

    let message = if exactly_one(&id, affected)? {
        "Movie was updated successfully.".to_string()
    } else {
        debug!(id = %id, "update matched no movie");
        format!("Cannot update Movie with id={id}. Maybe Movie was not found or req.body is empty!")
    };
    Ok(Json(MessageBody::new(message)))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageBody>> {
    let affected = state
        .movies
        .delete(&id)
        .await
        .map_err(|err| ApiError::storage(format!("Could not delete Movie with id={id}"), err))?;

    let message = if exactly_one(&id, affected)? {
        "Movie was deleted successfully!".to_string()
    } else {
        debug!(id = %id, "delete matched no movie");
        format!("Cannot delete Movie with id={id}. Maybe Movie was not found!")
    };
    Ok(Json(MessageBody::new(message)))
}

/// `id` is the primary key, so an id-keyed write touches zero rows or one.
fn exactly_one(id: &str, affected: u64) -> AppResult<bool> {
    match affected {
        0 => Ok(false),
        1 => Ok(true),
        n => Err(ApiError::RowCount { id: id.to_string(), affected: n }),
    }
}

fn message_or(err: &StorageError, fallback: &str) -> String {
    let text = err.to_string();
    if text.trim().is_empty() { fallback.to_string() } else { text }
}
