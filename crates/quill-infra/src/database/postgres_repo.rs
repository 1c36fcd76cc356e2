//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use quill_core::domain::{Author, BlogPost, ResolvedPost};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorPatch, AuthorRepository, BlogPostRepository, PostFilter, PostPatch};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::blog_post::{self, Entity as BlogPostEntity};

/// PostgreSQL author repository.
pub struct PostgresAuthorRepository {
    db: DbConn,
}

impl PostgresAuthorRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

/// PostgreSQL blog post repository.
pub struct PostgresBlogPostRepository {
    db: DbConn,
}

impl PostgresBlogPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Author writes run against the unique index on user_name; a violation is a
/// constraint error, not a query error.
fn author_write_err(e: DbErr) -> RepoError {
    let msg = e.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint("userName already exists".to_string())
    } else {
        RepoError::Query(msg)
    }
}

fn resolve((post, author): (blog_post::Model, Option<author::Model>)) -> ResolvedPost {
    ResolvedPost {
        post: post.into(),
        author: author.map(Into::into),
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        let result = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Author>, RepoError> {
        tracing::debug!(user_name = %user_name, "Finding author by user name");

        let result = AuthorEntity::find()
            .filter(author::Column::UserName.eq(user_name))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, author: Author) -> Result<Author, RepoError> {
        let active_model: author::ActiveModel = author.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(author_write_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: Uuid, patch: AuthorPatch) -> Result<Option<Author>, RepoError> {
        // A merge of nothing is a plain read.
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut active_model = author::ActiveModel {
            id: sea_orm::Set(id),
            ..Default::default()
        };
        if let Some(first_name) = patch.first_name {
            active_model.first_name = sea_orm::Set(first_name);
        }
        if let Some(last_name) = patch.last_name {
            active_model.last_name = sea_orm::Set(last_name);
        }
        if let Some(user_name) = patch.user_name {
            active_model.user_name = sea_orm::Set(Some(user_name));
        }

        match active_model.update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(author_write_err(e)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        // Idempotent: a zero row count is still success.
        AuthorEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(())
    }
}

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn list(&self, filter: PostFilter) -> Result<Vec<ResolvedPost>, RepoError> {
        let mut query = BlogPostEntity::find();
        if let Some(title) = &filter.title {
            query = query.filter(blog_post::Column::Title.eq(title.as_str()));
        }
        if let Some(content) = &filter.content {
            query = query.filter(blog_post::Column::Content.eq(content.as_str()));
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(blog_post::Column::AuthorId.eq(author_id));
        }
        if let Some(created) = filter.created {
            query = query.filter(blog_post::Column::PublishDate.eq(created));
        }

        let rows = query
            .find_also_related(AuthorEntity)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(resolve).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ResolvedPost>, RepoError> {
        let row = BlogPostEntity::find_by_id(id)
            .find_also_related(AuthorEntity)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(row.map(resolve))
    }

    async fn create(&self, post: BlogPost) -> Result<ResolvedPost, RepoError> {
        let active_model: blog_post::ActiveModel = post.into();
        let model = active_model.insert(&self.db).await.map_err(query_err)?;

        // Follow-up read to resolve the author reference.
        self.find_by_id(model.id)
            .await?
            .ok_or_else(|| RepoError::Query("created post could not be read back".to_string()))
    }

    async fn update(
        &self,
        id: Uuid,
        patch: PostPatch,
    ) -> Result<Option<ResolvedPost>, RepoError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut active_model = blog_post::ActiveModel {
            id: sea_orm::Set(id),
            ..Default::default()
        };
        if let Some(title) = patch.title {
            active_model.title = sea_orm::Set(title);
        }
        if let Some(content) = patch.content {
            active_model.content = sea_orm::Set(content);
        }
        if let Some(author_id) = patch.author_id {
            active_model.author_id = sea_orm::Set(author_id);
        }

        match active_model.update(&self.db).await {
            Ok(model) => self.find_by_id(model.id).await,
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        BlogPostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(())
    }
}
