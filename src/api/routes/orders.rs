//! Mounted at `/orders` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::api::handlers::orders;
use crate::api::state::AppState;

/// Order routes.
///
/// ```text
/// POST   /        -> create_order
/// GET    /        -> list_orders
/// GET    /{id}    -> get_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create_order).get(orders::list_orders))
        .route("/{id}", get(orders::get_order))
}
