//! Wire-level error body.

use serde::{Deserialize, Serialize};

/// The error body every failing route answers with: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message)
    }

    pub fn not_found() -> Self {
        Self::new("Not Found")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}
