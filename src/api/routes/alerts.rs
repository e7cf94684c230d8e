use axum::routing::get;
use axum::Router;

use crate::api::handlers::alerts;
use crate::api::state::AppState;

/// ```text
/// GET    /    -> list_alerts
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(alerts::list_alerts))
}
