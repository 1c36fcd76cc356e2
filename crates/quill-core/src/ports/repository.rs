use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Author, BlogPost, ResolvedPost};
use crate::error::RepoError;

/// Exact-match filter for listing posts.
///
/// The fields here are the full allow-list of queryable fields; anything else
/// a client sends is never consulted.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<Uuid>,
    pub created: Option<DateTime<Utc>>,
}

/// Merge-update payload for a post. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<Uuid>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author_id.is_none()
    }
}

/// Merge-update payload for an author.
#[derive(Debug, Clone, Default)]
pub struct AuthorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl AuthorPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.user_name.is_none()
    }
}

/// Author repository.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find an author by their unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError>;

    /// Find an author by their user name.
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Author>, RepoError>;

    /// Insert a new author.
    async fn create(&self, author: Author) -> Result<Author, RepoError>;

    /// Merge the patch into an existing author. `None` when the id is unknown.
    async fn update(&self, id: Uuid, patch: AuthorPatch) -> Result<Option<Author>, RepoError>;

    /// Delete by id. Idempotent: deleting a missing author is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Blog post repository. Every read resolves the author reference.
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// List posts matching the filter, in storage order.
    async fn list(&self, filter: PostFilter) -> Result<Vec<ResolvedPost>, RepoError>;

    /// Find a post by id with its author resolved.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ResolvedPost>, RepoError>;

    /// Insert a new post and return it with the author resolved via a
    /// follow-up read.
    async fn create(&self, post: BlogPost) -> Result<ResolvedPost, RepoError>;

    /// Merge the patch into an existing post. `None` when the id is unknown.
    async fn update(&self, id: Uuid, patch: PostPatch)
    -> Result<Option<ResolvedPost>, RepoError>;

    /// Delete by id. Idempotent: deleting a missing post is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
