//! BlogPost entity for SeaORM.
//!
//! Comments live in a JSONB column on the post row; they have no identity or
//! lifecycle outside their post.

use sea_orm::{FromJsonQueryResult, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use quill_core::domain::Comment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Plain column, no foreign key: author deletes must not cascade and the
    /// reference is allowed to dangle.
    pub author_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub publish_date: DateTimeWithTimeZone,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: Comments,
}

/// JSONB-backed comment list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Comments(pub Vec<Comment>);

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain BlogPost.
impl From<Model> for quill_core::domain::BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            content: model.content,
            publish_date: model.publish_date.into(),
            comments: model.comments.0,
        }
    }
}

/// Conversion from Domain BlogPost to SeaORM ActiveModel.
impl From<quill_core::domain::BlogPost> for ActiveModel {
    fn from(post: quill_core::domain::BlogPost) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            title: Set(post.title),
            content: Set(post.content),
            publish_date: Set(post.publish_date.into()),
            comments: Set(Comments(post.comments)),
        }
    }
}
