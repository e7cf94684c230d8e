//! Handler for the stress simulation.
//!
//! Simulation is CPU-bound and runs on the blocking pool against its own
//! engines; the live dispatcher is never locked.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::api::error::{AppError, AppResult};
use crate::api::extract::AppQuery;
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::simulation::{SimulationConfig, Simulator};

/// Default number of cases when `testCases` is omitted.
const DEFAULT_TEST_CASES: u32 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub test_cases: Option<u32>,
    pub seed: Option<u64>,
}

/// POST /simulation/run?testCases=N&seed=S
pub async fn run_simulation(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SimulationParams>,
) -> AppResult<impl IntoResponse> {
    let test_cases = params.test_cases.unwrap_or(DEFAULT_TEST_CASES);
    let max = state.config.max_simulation_cases;
    if test_cases == 0 || test_cases as usize > max {
        return Err(AppError::BadRequest(format!(
            "testCases must be between 1 and {max}, got {test_cases}"
        )));
    }

    let config = SimulationConfig::default()
        .with_seed(params.seed.unwrap_or(state.config.simulation_seed))
        .with_dispatch(state.config.dispatch.clone());
    let simulator = Simulator::new(config)?;

    tracing::info!(test_cases, "Running simulation");
    let cases = tokio::task::spawn_blocking(move || simulator.run(test_cases))
        .await
        .map_err(|e| AppError::InternalError(format!("simulation task failed: {e}")))??;

    Ok(Json(ApiResponse::new(cases)))
}
