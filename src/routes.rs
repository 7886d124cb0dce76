use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Path,
    routing::get,
};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, extract::JsonBody, models::MessageBody, movies};

pub fn router(state: Arc<AppState>) -> Router {
    let movies = Router::new()
        .route("/", get(movies::list).post(movies::create))
        .route("/{id}", get(movies::get).put(movies::update).delete(movies::delete));

    Router::new()
        .route("/", get(index).post(greet))
        .route("/about", get(about))
        .route("/about/{name}", get(about_for))
        .route("/{name}", get(hello))
        .nest(&state.config.movies_path, movies)
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

pub async fn index() -> &'static str {
    "Hello, world!"
}

pub async fn hello(Path(name): Path<String>) -> String {
    format!("Hello, {name}!")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreetRequest {
    first_name: String,
    last_name: String,
}

pub async fn greet(JsonBody(req): JsonBody<GreetRequest>) -> Json<MessageBody> {
    Json(MessageBody::new(format!("Hello, {} {}!", req.first_name, req.last_name)))
}

pub async fn about() -> &'static str {
    "This is an API service for CRUD actions on movies resources."
}

pub async fn about_for(Path(name): Path<String>) -> String {
    format!("This is an API service for CRUD actions on a movies resource...for you {name}")
}
