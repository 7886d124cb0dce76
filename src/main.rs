mod config;
mod db;
mod entities;
mod error;
mod extract;
mod id;
mod models;
mod movies;
mod repository;
mod routes;

use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::Config,
    id::{IdGenerator, UuidV4},
    repository::MovieRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: Arc<dyn MovieRepository>,
    pub ids: Arc<dyn IdGenerator>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movies_service=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("opening {}", config.database_url))?;
    let movies = repository::open(config.store, db.clone());

    let state = Arc::new(AppState { config: config.clone(), movies, ids: Arc::new(UuidV4) });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, store = ?config.store, movies = %config.movies_path, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    db.close().await?;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
