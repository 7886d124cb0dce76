use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;

/// Which repository implementation backs the movie routes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StoreKind {
    /// sea-orm entity API.
    #[default]
    Orm,
    /// Hand-built sea-query statements.
    Query,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orm" => Ok(StoreKind::Orm),
            "query" | "query-builder" => Ok(StoreKind::Query),
            other => anyhow::bail!("unknown store kind {other:?}, expected \"orm\" or \"query\""),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub store: StoreKind,
    pub movies_path: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8080".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let store = match std::env::var("MOVIE_STORE") {
            Ok(s) => s.parse().context("MOVIE_STORE")?,
            Err(_) => StoreKind::default(),
        };

        let movies_path =
            normalize_path(&std::env::var("MOVIES_PATH").unwrap_or_else(|_| "/api/movies".into()))
                .context("MOVIES_PATH")?;

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            store,
            movies_path,
        })
    }
}

fn normalize_path(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        anyhow::bail!("movie routes cannot be mounted at the root");
    }
    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{trimmed}"))
    }
}
