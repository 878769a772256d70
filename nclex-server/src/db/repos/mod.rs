//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the shared pool; every call checks out one connection
//! - Binds all values as parameters
//! - Uses a transaction only where two statements must land together

pub mod reviews;
pub mod comments;
pub mod views;
pub mod stats;

pub use reviews::{Review, ReviewRepo};
pub use comments::{Comment, CommentRepo};
pub use views::ViewRepo;
pub use stats::{Stats, StatsRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn review_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "review",
            id: id.to_string(),
        }
    }
}
