use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use super::UserFilter;
use crate::api::error::AppResult;
use crate::api::extract::AppQuery;
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::stats::{BaristaStats, QueueStats};

/// GET /stats
pub async fn queue_stats(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<UserFilter>,
) -> AppResult<impl IntoResponse> {
    let dispatcher = state.dispatcher.read().await;
    let stats = QueueStats::calculate(&dispatcher, filter.username());
    Ok(Json(ApiResponse::new(stats)))
}

/// GET /stats/baristas
pub async fn barista_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let dispatcher = state.dispatcher.read().await;
    Ok(Json(ApiResponse::new(BaristaStats::calculate(&dispatcher))))
}
