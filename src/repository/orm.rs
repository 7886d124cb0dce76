use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryTrait, Set,
};

use super::{MovieRepository, name_contains};
use crate::{
    entities::movie,
    error::StorageError,
    models::{Movie, MoviePatch, NameFilter},
};

/// Repository backed by the sea-orm `movie` entity.
#[derive(Clone, Debug)]
pub struct OrmMovieRepository {
    db: DatabaseConnection,
}

impl OrmMovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieRepository for OrmMovieRepository {
    async fn create(&self, movie: Movie) -> Result<Movie, StorageError> {
        let model = movie::ActiveModel {
            id: Set(movie.id),
            name: Set(movie.name),
            genre: Set(movie.genre),
            img: Set(movie.img),
        }
        .insert(&self.db)
        .await?;
        Ok(model.into())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Movie>, StorageError> {
        let found = movie::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(found.map(Movie::from))
    }

    async fn list(&self, filter: Option<NameFilter>) -> Result<Vec<Movie>, StorageError> {
        let rows = movie::Entity::find()
            .apply_if(filter, |q, f| q.filter(name_contains(movie::Column::Name, &f)))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn update(&self, id: &str, patch: MoviePatch) -> Result<u64, StorageError> {
        if patch.is_empty() {
            return Ok(0);
        }

        let changes = movie::ActiveModel {
            id: NotSet,
            name: patch.name.map_or(NotSet, Set),
            genre: patch.genre.map_or(NotSet, Set),
            img: patch.img.map_or(NotSet, Set),
        };

        let res = movie::Entity::update_many()
            .set(changes)
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }

    async fn delete(&self, id: &str) -> Result<u64, StorageError> {
        let res = movie::Entity::delete_by_id(id.to_string()).exec(&self.db).await?;
        Ok(res.rows_affected)
    }
}
