//! Mounted at `/complaints` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::api::handlers::complaints;
use crate::api::state::AppState;

/// Complaint routes.
///
/// ```text
/// POST   /                  -> create_complaint
/// GET    /                  -> list_complaints
/// GET    /barista/{name}    -> list_by_barista
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(complaints::list_complaints).post(complaints::create_complaint),
        )
        .route("/barista/{name}", get(complaints::list_by_barista))
}
