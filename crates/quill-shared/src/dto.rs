//! Data Transfer Objects - request bodies and serialization views for the API.
//!
//! Wire names are camelCase. Request bodies keep every field optional so that
//! handlers can report exactly which required field is missing; everything
//! outside these structs is silently ignored on the way in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
}

/// Request to update a blog post. The body id must match the path id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<String>,
}

/// Request to create an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

/// Request to update an author. The body id must match the path id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

/// List/update view of a post: the author reference is resolved into a
/// display name. `author` is null when the referenced author no longer
/// exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub publish_date: DateTime<Utc>,
}

/// Detail view of a post: the list view plus the post's comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub publish_date: DateTime<Utc>,
    pub comments: Vec<CommentView>,
}

/// A single comment as exposed in the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub content: String,
}

/// Public view of an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub user_name: Option<String>,
}
