use sea_orm::entity::prelude::*;

use crate::models::Movie;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub genre: String,
    pub img: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Movie {
    fn from(m: Model) -> Self {
        Movie { id: m.id, name: m.name, genre: m.genre, img: m.img }
    }
}
