pub mod alerts;
pub mod baristas;
pub mod complaints;
pub mod health;
pub mod orders;
pub mod simulation;
pub mod stats;

use axum::routing::post;
use axum::Router;

use super::handlers;
use super::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /orders                         submit (POST), live queue (GET, ?username=)
/// /orders/{id}                    single order, any status
///
/// /baristas                       barista table
/// /baristas/{id}/complete         completion signal (POST)
///
/// /stats                          queue summary (?username=)
/// /stats/baristas                 per-barista lifetime figures
///
/// /alerts                         alert log suffix (?since=)
/// /recalculate                    force a scheduling tick (POST)
///
/// /simulation/run                 stress simulation (POST, ?testCases=&seed=)
///
/// /complaints                     list newest first (GET), file (POST)
/// /complaints/barista/{name}      complaints about one barista
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/orders", orders::router())
        .nest("/baristas", baristas::router())
        .nest("/stats", stats::router())
        .nest("/alerts", alerts::router())
        .nest("/simulation", simulation::router())
        .nest("/complaints", complaints::router())
        .route("/recalculate", post(handlers::scheduler::recalculate))
}
