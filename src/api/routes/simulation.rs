use axum::routing::post;
use axum::Router;

use crate::api::handlers::simulation;
use crate::api::state::AppState;

/// ```text
/// POST   /run    -> run_simulation
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/run", post(simulation::run_simulation))
}
