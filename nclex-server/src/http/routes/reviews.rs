//! Review endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::{CreatedResponse, MessageResponse};
use crate::db::repos::{Review, ReviewRepo, ViewRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ClientIp, ReviewId};
use crate::http::server::AppState;
use crate::models::{NewReview, ReviewListParams, ReviewSubmission};

/// Paged review list
#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<Review>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Like count after a like
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub likes: i64,
}

/// GET /api/reviews - filtered, paginated list
async fn list_reviews(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ReviewListParams>, QueryRejection>,
) -> Result<Json<ReviewListResponse>, ApiError> {
    let Query(params) = params?;
    let page = params.pagination()?;
    let filter = params.filter();

    let result = ReviewRepo::new(&state.pool).list(&filter, page).await?;
    let total_pages = result.total_pages();

    Ok(Json(ReviewListResponse {
        reviews: result.items,
        total: result.total,
        page: result.page,
        per_page: result.per_page,
        total_pages,
    }))
}

/// POST /api/reviews - submit a review
async fn create_review(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReviewSubmission>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(submission) = payload?;
    let review = NewReview::try_from(submission)?;
    let id = ReviewRepo::new(&state.pool).create(&review).await?;

    tracing::info!(review_id = id, "review submitted");
    Ok(Json(CreatedResponse {
        id,
        message: "Review created successfully",
    }))
}

/// GET /api/reviews/{id} - fetch one review, counting the view once per IP
async fn get_review(
    State(state): State<Arc<AppState>>,
    ReviewId(id): ReviewId,
    ip: ClientIp,
) -> Result<Json<Review>, ApiError> {
    let repo = ReviewRepo::new(&state.pool);
    let review = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::review_not_found(id))?;

    if ViewRepo::new(&state.pool)
        .record_view(id, ip.as_str())
        .await?
    {
        // re-read so the response carries the new count
        return Ok(Json(repo.require(id).await?));
    }

    Ok(Json(review))
}

/// POST /api/reviews/{id}/like
async fn like_review(
    State(state): State<Arc<AppState>>,
    ReviewId(id): ReviewId,
) -> Result<Json<LikeResponse>, ApiError> {
    let repo = ReviewRepo::new(&state.pool);
    if !repo.exists(id).await? {
        return Err(ApiError::review_not_found(id));
    }

    let likes = repo.increment_likes(id).await?;
    Ok(Json(LikeResponse { likes }))
}

/// DELETE /api/reviews/{id}
async fn delete_review(
    State(state): State<Arc<AppState>>,
    ReviewId(id): ReviewId,
) -> Result<Json<MessageResponse>, ApiError> {
    if !ReviewRepo::new(&state.pool).delete(id).await? {
        return Err(ApiError::review_not_found(id));
    }

    tracing::info!(review_id = id, "review deleted");
    Ok(Json(MessageResponse {
        message: "Review deleted successfully",
    }))
}

/// Review routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/reviews", get(list_reviews).post(create_review))
        .route("/api/reviews/{id}", get(get_review).delete(delete_review))
        .route("/api/reviews/{id}/like", post(like_review))
}
