use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Author;

/// BlogPost entity - references its author by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub publish_date: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

/// A comment owned by its parent post. Content-only, no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub content: String,
}

impl BlogPost {
    /// Create a new post. The publish date defaults to now when not supplied.
    pub fn new(
        author_id: Uuid,
        title: String,
        content: String,
        publish_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            publish_date: publish_date.unwrap_or_else(Utc::now),
            comments: Vec::new(),
        }
    }
}

/// A post with its author reference resolved for response purposes.
///
/// The author is optional: the reference may dangle when the author was
/// deleted after the post was written (author deletes do not cascade).
#[derive(Debug, Clone)]
pub struct ResolvedPost {
    pub post: BlogPost,
    pub author: Option<Author>,
}

impl ResolvedPost {
    /// The resolved author's display name, if the reference still resolves.
    pub fn author_name(&self) -> Option<String> {
        self.author.as_ref().map(Author::display_name)
    }
}
