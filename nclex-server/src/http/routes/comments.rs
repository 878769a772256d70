//! Comment endpoints, nested under a review

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::CreatedResponse;
use crate::db::repos::{Comment, CommentRepo, ReviewRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ReviewId;
use crate::http::server::AppState;
use crate::models::{CommentSubmission, NewComment};

/// Comment list response
#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
}

async fn ensure_review(state: &AppState, id: i64) -> Result<(), ApiError> {
    if ReviewRepo::new(&state.pool).exists(id).await? {
        Ok(())
    } else {
        Err(ApiError::review_not_found(id))
    }
}

/// GET /api/reviews/{id}/comments - oldest first
async fn list_comments(
    State(state): State<Arc<AppState>>,
    ReviewId(id): ReviewId,
) -> Result<Json<CommentListResponse>, ApiError> {
    ensure_review(&state, id).await?;
    let comments = CommentRepo::new(&state.pool).list_for_review(id).await?;
    Ok(Json(CommentListResponse { comments }))
}

/// POST /api/reviews/{id}/comments
async fn create_comment(
    State(state): State<Arc<AppState>>,
    ReviewId(id): ReviewId,
    payload: Result<Json<CommentSubmission>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(submission) = payload?;
    let comment = NewComment::try_from(submission)?;
    ensure_review(&state, id).await?;

    let comment_id = CommentRepo::new(&state.pool).create(id, &comment).await?;
    Ok(Json(CreatedResponse {
        id: comment_id,
        message: "Comment created successfully",
    }))
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/reviews/{id}/comments",
        get(list_comments).post(create_comment),
    )
}
