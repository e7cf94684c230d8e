//! Timeout monitor task.
//!
//! Runs independently of request-driven ticks on a fixed interval. Each
//! pass, under one write lock:
//!
//! 1. Completes orders whose prep time elapsed (when `auto_complete` is on)
//! 2. Sweeps timeouts
//! 3. Runs the interval tick if due
//!
//! Then it files one complaint per expired order.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use super::state::AppState;

/// Run the monitor loop until `cancel` is triggered.
pub async fn run_monitor(state: AppState, cancel: CancellationToken) {
    let period = Duration::from_millis(state.config.monitor_interval_ms.max(1));
    tracing::info!(
        interval_ms = period.as_millis() as u64,
        auto_complete = state.config.auto_complete,
        "Timeout monitor started"
    );

    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Timeout monitor stopping");
                break;
            }
            _ = interval.tick() => {
                monitor_pass(&state).await;
            }
        }
    }
}

/// One monitor pass.
///
/// Every order expired by the sweep gets an automatic complaint, filed
/// after the engine lock is released.
pub async fn monitor_pass(state: &AppState) {
    let now = state.now_ms();
    let sweep = {
        let mut dispatcher = state.dispatcher.write().await;

        if state.config.auto_complete {
            let finished = dispatcher.complete_due(now);
            if !finished.is_empty() {
                tracing::debug!(count = finished.len(), "Auto-completed orders");
            }
        }

        let sweep = dispatcher.sweep_timeouts(now);
        if !sweep.expired.is_empty() {
            tracing::warn!(
                count = sweep.expired.len(),
                total = dispatcher.timeout_count(),
                "Timeout sweep expired orders"
            );
        }

        dispatcher.tick_if_due(now);
        sweep
    };

    if sweep.expired.is_empty() {
        return;
    }
    let filed_at = DateTime::<Utc>::from_timestamp_millis(now).unwrap_or_else(Utc::now);
    let mut complaints = state.complaints.write().await;
    for expired in &sweep.expired {
        complaints.file_timeout(expired, filed_at);
    }
}
