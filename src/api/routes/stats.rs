//! Mounted at `/stats` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::api::handlers::stats;
use crate::api::state::AppState;

/// Statistics routes.
///
/// ```text
/// GET    /            -> queue_stats
/// GET    /baristas    -> barista_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stats::queue_stats))
        .route("/baristas", get(stats::barista_stats))
}
