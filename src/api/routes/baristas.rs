//! Mounted at `/baristas` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::api::handlers::baristas;
use crate::api::state::AppState;

/// Barista routes.
///
/// ```text
/// GET    /                -> list_baristas
/// POST   /{id}/complete   -> complete_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(baristas::list_baristas))
        .route("/{id}/complete", post(baristas::complete_order))
}
