//! Route handlers organized by resource

pub mod health;
pub mod stats;
pub mod reviews;
pub mod comments;

use serde::Serialize;

/// Body returned after creating a resource
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: &'static str,
}

/// Body carrying only a human-readable message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
