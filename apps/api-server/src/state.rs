//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::DbConn;

use quill_core::ports::{AuthorRepository, BlogPostRepository};
use quill_infra::{PostgresAuthorRepository, PostgresBlogPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<dyn AuthorRepository>,
    pub posts: Arc<dyn BlogPostRepository>,
}

impl AppState {
    /// Build the application state over an established connection.
    pub fn new(db: DbConn) -> Self {
        Self {
            authors: Arc::new(PostgresAuthorRepository::new(db.clone())),
            posts: Arc::new(PostgresBlogPostRepository::new(db)),
        }
    }
}
