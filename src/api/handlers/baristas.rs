//! Handlers for the barista table and completion signals.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::error::AppResult;
use crate::api::extract::AppPath;
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::models::BaristaId;

/// GET /baristas
pub async fn list_baristas(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let baristas = state.dispatcher.read().await.baristas().to_vec();
    Ok(Json(ApiResponse::new(baristas)))
}

/// POST /baristas/{id}/complete
///
/// Completes the barista's current order and runs a tick. Returns the
/// completed order.
pub async fn complete_order(
    State(state): State<AppState>,
    AppPath(id): AppPath<BaristaId>,
) -> AppResult<impl IntoResponse> {
    let now = state.now_ms();
    let order = state.dispatcher.write().await.complete(id, now)?;
    Ok(Json(ApiResponse::new(order)))
}
