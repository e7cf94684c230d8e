use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::api::error::AppResult;
use crate::api::extract::AppQuery;
use crate::api::response::ApiResponse;
use crate::api::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AlertParams {
    /// First sequence number to return (default: 0, the whole log).
    pub since: Option<u64>,
}

/// GET /alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<AlertParams>,
) -> AppResult<impl IntoResponse> {
    let alerts = state
        .dispatcher
        .read()
        .await
        .alerts()
        .since(params.since.unwrap_or(0))
        .to_vec();
    Ok(Json(ApiResponse::new(alerts)))
}
