use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::error::AppResult;
use crate::api::response::ApiResponse;
use crate::api::state::AppState;

/// POST /recalculate
///
/// Forces a scheduling tick and returns what it did.
pub async fn recalculate(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let now = state.now_ms();
    let report = state.dispatcher.write().await.tick(now);
    tracing::info!(
        assigned = report.assigned.len(),
        skipped = report.skipped.len(),
        "Manual recalculation"
    );
    Ok(Json(ApiResponse::new(report)))
}
