mod orm;
mod query;

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection,
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr},
};

pub use self::{orm::OrmMovieRepository, query::QueryMovieRepository};
use crate::{
    config::StoreKind,
    error::StorageError,
    models::{Movie, MoviePatch, NameFilter},
};

/// Persistence for the `movies` table.
///
/// `update` and `delete` return the number of rows touched so callers can
/// tell a missing id (0) from a successful write (1) without reading back.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Inserts `movie` as given, id included.
    async fn create(&self, movie: Movie) -> Result<Movie, StorageError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Movie>, StorageError>;

    /// All movies, or those whose name contains the filter term ignoring case.
    async fn list(&self, filter: Option<NameFilter>) -> Result<Vec<Movie>, StorageError>;

    /// Writes only the fields present in `patch`. An empty patch touches nothing.
    async fn update(&self, id: &str, patch: MoviePatch) -> Result<u64, StorageError>;

    async fn delete(&self, id: &str) -> Result<u64, StorageError>;
}

pub fn open(kind: StoreKind, db: DatabaseConnection) -> Arc<dyn MovieRepository> {
    match kind {
        StoreKind::Orm => Arc::new(OrmMovieRepository::new(db)),
        StoreKind::Query => Arc::new(QueryMovieRepository::new(db)),
    }
}

fn name_contains<C: IntoColumnRef>(col: C, filter: &NameFilter) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col)))
        .like(LikeExpr::new(filter.like_pattern()).escape('\\'))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::db;

    async fn stores() -> Vec<(StoreKind, Arc<dyn MovieRepository>)> {
        let mut out = Vec::new();
        for kind in [StoreKind::Orm, StoreKind::Query] {
            out.push((kind, open(kind, db::memory().await)));
        }
        out
    }

    fn movie(id: &str, name: &str) -> Movie {
        Movie {
            id: id.to_string(),
            name: name.to_string(),
            genre: "Animation".to_string(),
            img: format!("{id}.jpg"),
        }
    }

    fn names(movies: &[Movie]) -> HashSet<String> {
        movies.iter().map(|m| m.name.clone()).collect()
    }

    #[tokio::test]
    async fn create_then_get_returns_same_movie() {
        for (kind, repo) in stores().await {
            let created = repo.create(movie("a", "Inception")).await.unwrap();
            assert_eq!(created, movie("a", "Inception"), "{kind:?}");

            let fetched = repo.get_by_id("a").await.unwrap();
            assert_eq!(fetched, Some(created), "{kind:?}");
        }
    }

    #[tokio::test]
    async fn duplicate_id_is_a_storage_error() {
        for (kind, repo) in stores().await {
            repo.create(movie("a", "Heat")).await.unwrap();
            let err = repo.create(movie("a", "Ronin")).await;
            assert!(err.is_err(), "{kind:?}");
            assert_eq!(repo.list(None).await.unwrap().len(), 1, "{kind:?}");
        }
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_not_error() {
        for (kind, repo) in stores().await {
            assert_eq!(repo.get_by_id("missing").await.unwrap(), None, "{kind:?}");
        }
    }

    #[tokio::test]
    async fn list_without_filter_returns_everything() {
        for (kind, repo) in stores().await {
            assert!(repo.list(None).await.unwrap().is_empty(), "{kind:?}");

            for (id, name) in [("1", "Zootopia"), ("2", "The Zoo"), ("3", "Zorro")] {
                repo.create(movie(id, name)).await.unwrap();
            }
            let all = repo.list(None).await.unwrap();
            assert_eq!(
                names(&all),
                HashSet::from(["Zootopia".into(), "The Zoo".into(), "Zorro".into()]),
                "{kind:?}"
            );
        }
    }

    #[tokio::test]
    async fn name_filter_is_case_insensitive_substring() {
        for (kind, repo) in stores().await {
            for (id, name) in [("1", "Zootopia"), ("2", "The Zoo"), ("3", "Zorro")] {
                repo.create(movie(id, name)).await.unwrap();
            }

            let hits = repo.list(NameFilter::new(Some("zoo".into()))).await.unwrap();
            assert_eq!(
                names(&hits),
                HashSet::from(["Zootopia".into(), "The Zoo".into()]),
                "{kind:?}"
            );

            let hits = repo.list(NameFilter::new(Some("ZORR".into()))).await.unwrap();
            assert_eq!(names(&hits), HashSet::from(["Zorro".into()]), "{kind:?}");

            let hits = repo.list(NameFilter::new(Some("batman".into()))).await.unwrap();
            assert!(hits.is_empty(), "{kind:?}");
        }
    }

    #[tokio::test]
    async fn like_wildcards_in_filter_match_literally() {
        for (kind, repo) in stores().await {
            repo.create(movie("1", "100% Wolf")).await.unwrap();
            repo.create(movie("2", "1000 Ways")).await.unwrap();
            repo.create(movie("3", "snake_case")).await.unwrap();
            repo.create(movie("4", "snakeXcase")).await.unwrap();

            let hits = repo.list(NameFilter::new(Some("100%".into()))).await.unwrap();
            assert_eq!(names(&hits), HashSet::from(["100% Wolf".into()]), "{kind:?}");

            let hits = repo.list(NameFilter::new(Some("e_c".into()))).await.unwrap();
            assert_eq!(names(&hits), HashSet::from(["snake_case".into()]), "{kind:?}");
        }
    }

    #[tokio::test]
    async fn update_touches_only_given_fields() {
        for (kind, repo) in stores().await {
            repo.create(movie("a", "Alien")).await.unwrap();

            let patch = MoviePatch { name: Some("Aliens".into()), ..Default::default() };
            assert_eq!(repo.update("a", patch).await.unwrap(), 1, "{kind:?}");

            let after = repo.get_by_id("a").await.unwrap().unwrap();
            assert_eq!(after, Movie { name: "Aliens".into(), ..movie("a", "Alien") }, "{kind:?}");
        }
    }

    #[tokio::test]
    async fn update_with_empty_string_writes_empty_string() {
        for (kind, repo) in stores().await {
            repo.create(movie("a", "Alien")).await.unwrap();

            let patch = MoviePatch { img: Some(String::new()), ..Default::default() };
            assert_eq!(repo.update("a", patch).await.unwrap(), 1, "{kind:?}");
            assert_eq!(repo.get_by_id("a").await.unwrap().unwrap().img, "", "{kind:?}");
        }
    }

    #[tokio::test]
    async fn update_missing_or_empty_affects_nothing() {
        for (kind, repo) in stores().await {
            repo.create(movie("a", "Alien")).await.unwrap();

            let patch = MoviePatch { name: Some("X".into()), ..Default::default() };
            assert_eq!(repo.update("missing", patch).await.unwrap(), 0, "{kind:?}");
            assert_eq!(repo.update("a", MoviePatch::default()).await.unwrap(), 0, "{kind:?}");

            assert_eq!(repo.list(None).await.unwrap(), vec![movie("a", "Alien")], "{kind:?}");
        }
    }

    #[tokio::test]
    async fn delete_reports_rows_removed() {
        for (kind, repo) in stores().await {
            repo.create(movie("a", "Alien")).await.unwrap();
            repo.create(movie("b", "Brazil")).await.unwrap();

            assert_eq!(repo.delete("missing").await.unwrap(), 0, "{kind:?}");
            assert_eq!(repo.list(None).await.unwrap().len(), 2, "{kind:?}");

            assert_eq!(repo.delete("a").await.unwrap(), 1, "{kind:?}");
            assert_eq!(repo.get_by_id("a").await.unwrap(), None, "{kind:?}");
            assert_eq!(repo.delete("a").await.unwrap(), 0, "{kind:?}");
            assert_eq!(repo.list(None).await.unwrap(), vec![movie("b", "Brazil")], "{kind:?}");
        }
    }

    #[tokio::test]
    async fn both_backends_share_one_table() {
        let conn = db::memory().await;
        let orm = open(StoreKind::Orm, conn.clone());
        let query = open(StoreKind::Query, conn);

        orm.create(movie("a", "Amelie")).await.unwrap();
        assert_eq!(query.get_by_id("a").await.unwrap(), Some(movie("a", "Amelie")));

        query.create(movie("b", "Brazil")).await.unwrap();
        assert_eq!(orm.list(None).await.unwrap().len(), 2);
    }
}
