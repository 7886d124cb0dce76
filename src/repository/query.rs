use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, DeriveIden, QueryResult, StatementBuilder,
    sea_query::{Expr, Query, SimpleExpr},
};

use super::{MovieRepository, name_contains};
use crate::{
    error::StorageError,
    models::{Movie, MoviePatch, NameFilter},
};

#[derive(Clone, Copy, DeriveIden)]
enum Movies {
    Table,
    Id,
    Name,
    Genre,
    Img,
}

const COLUMNS: [Movies; 4] = [Movies::Id, Movies::Name, Movies::Genre, Movies::Img];

/// Repository that builds its own sea-query statements and runs them over a
/// plain connection, without the entity layer.
#[derive(Clone, Debug)]
pub struct QueryMovieRepository {
    db: DatabaseConnection,
}

impl QueryMovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn execute<S: StatementBuilder>(&self, stmt: &S) -> Result<u64, StorageError> {
        let stmt = self.db.get_database_backend().build(stmt);
        Ok(self.db.execute(stmt).await?.rows_affected())
    }
}

fn movie_from_row(row: &QueryResult) -> Result<Movie, DbErr> {
    Ok(Movie {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        genre: row.try_get("", "genre")?,
        img: row.try_get("", "img")?,
    })
}

#[async_trait]
impl MovieRepository for QueryMovieRepository {
    async fn create(&self, movie: Movie) -> Result<Movie, StorageError> {
        let mut insert = Query::insert();
        insert.into_table(Movies::Table).columns(COLUMNS).values([
            movie.id.into(),
            movie.name.into(),
            movie.genre.into(),
            movie.img.into(),
        ])?;
        insert.returning_all();

        let stmt = self.db.get_database_backend().build(&insert);
        let row = self.db.query_one(stmt).await?.ok_or(DbErr::RecordNotInserted)?;
        Ok(movie_from_row(&row)?)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Movie>, StorageError> {
        let select = Query::select()
            .columns(COLUMNS)
            .from(Movies::Table)
            .and_where(Expr::col(Movies::Id).eq(id))
            .to_owned();

        let stmt = self.db.get_database_backend().build(&select);
        match self.db.query_one(stmt).await? {
            Some(row) => Ok(Some(movie_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: Option<NameFilter>) -> Result<Vec<Movie>, StorageError> {
        let select = Query::select()
            .columns(COLUMNS)
            .from(Movies::Table)
            .and_where_option(filter.map(|f| name_contains(Movies::Name, &f)))
            .to_owned();

        let stmt = self.db.get_database_backend().build(&select);
        let rows = self.db.query_all(stmt).await?;
        let movies = rows.iter().map(movie_from_row).collect::<Result<Vec<_>, _>>()?;
        Ok(movies)
    }

    async fn update(&self, id: &str, patch: MoviePatch) -> Result<u64, StorageError> {
        let values: Vec<(Movies, SimpleExpr)> = [
            (Movies::Name, patch.name),
            (Movies::Genre, patch.genre),
            (Movies::Img, patch.img),
        ]
        .into_iter()
        .filter_map(|(col, v)| v.map(|v| (col, v.into())))
        .collect();

        if values.is_empty() {
            return Ok(0);
        }

        let update = Query::update()
            .table(Movies::Table)
            .values(values)
            .and_where(Expr::col(Movies::Id).eq(id))
            .to_owned();
        self.execute(&update).await
    }

    async fn delete(&self, id: &str) -> Result<u64, StorageError> {
        let delete = Query::delete()
            .from_table(Movies::Table)
            .and_where(Expr::col(Movies::Id).eq(id))
            .to_owned();
        self.execute(&delete).await
    }
}
