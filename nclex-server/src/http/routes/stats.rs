//! Stats endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::{Stats, StatsRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /api/stats
async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<Stats>, ApiError> {
    let stats = StatsRepo::new(&state.pool).compute().await?;
    Ok(Json(stats))
}

/// Stats routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(get_stats))
}
