use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author entity - a person who writes blog posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all authors when present.
    pub user_name: Option<String>,
}

impl Author {
    /// Create a new author with a generated ID.
    pub fn new(first_name: String, last_name: String, user_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            user_name,
        }
    }

    /// Display name used wherever a post's author is resolved for a response.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
