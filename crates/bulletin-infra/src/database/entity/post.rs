//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub poster: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for bulletin_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            poster: model.poster,
            title: model.title,
            body: model.body,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<bulletin_core::domain::Post> for ActiveModel {
    fn from(post: bulletin_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            poster: Set(post.poster),
            title: Set(post.title),
            body: Set(post.body),
        }
    }
}
