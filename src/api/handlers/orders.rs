//! Handlers for order submission and the live queue.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use super::UserFilter;
use crate::api::error::AppResult;
use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::models::{NewOrder, OrderId};

// ---------------------------------------------------------------------------
// POST /orders
// ---------------------------------------------------------------------------

/// Submit an order. The engine ticks immediately, so the returned order may
/// already be in progress.
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(input): AppJson<NewOrder>,
) -> AppResult<impl IntoResponse> {
    let now = state.now_ms();
    let order = state.dispatcher.write().await.submit(input, now)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(order))))
}

// ---------------------------------------------------------------------------
// GET /orders
// ---------------------------------------------------------------------------

/// Live queue: queued orders in rank order, then orders in progress.
pub async fn list_orders(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<UserFilter>,
) -> AppResult<impl IntoResponse> {
    let orders = state.dispatcher.read().await.queue(filter.username());
    Ok(Json(ApiResponse::new(orders)))
}

// ---------------------------------------------------------------------------
// GET /orders/{id}
// ---------------------------------------------------------------------------

pub async fn get_order(
    State(state): State<AppState>,
    AppPath(id): AppPath<OrderId>,
) -> AppResult<impl IntoResponse> {
    let order = state.dispatcher.read().await.order(id)?.clone();
    Ok(Json(ApiResponse::new(order)))
}
