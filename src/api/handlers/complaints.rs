//! Handlers for the complaint log.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};

use crate::api::error::AppResult;
use crate::api::extract::{AppJson, AppPath};
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::models::NewComplaint;

/// GET /complaints -- newest first.
pub async fn list_complaints(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let complaints = state.complaints.read().await.all_newest_first();
    Ok(Json(ApiResponse::new(complaints)))
}

/// POST /complaints
pub async fn create_complaint(
    State(state): State<AppState>,
    AppJson(input): AppJson<NewComplaint>,
) -> AppResult<impl IntoResponse> {
    let now = DateTime::<Utc>::from_timestamp_millis(state.now_ms()).unwrap_or_else(Utc::now);
    let complaint = state.complaints.write().await.submit(input, now)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(complaint))))
}

/// GET /complaints/barista/{name}
pub async fn list_by_barista(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let complaints = state.complaints.read().await.by_barista(&name);
    Ok(Json(ApiResponse::new(complaints)))
}
