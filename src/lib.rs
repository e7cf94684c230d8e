//! Priority-dispatch engine for a coffee bar.
//!
//! Ranks pending drink orders by a weighted, explainable priority formula,
//! hands them to a small fixed pool of baristas with load balancing, guards
//! against starvation and expires orders that blow the service deadline.
//! A seeded simulation harness drives the same engine with synthetic load
//! for calibration and regression testing.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`Order`, `Barista`, `Alert`, `Complaint`)
//! - **`priority`**: Weighted score terms and the `PriorityCalculator`
//! - **`fairness`**: Skip counters and per-barista workload ratios
//! - **`dispatch`**: The `Dispatcher` (ticks, completion, timeout sweep)
//! - **`stats`**: Read-side queue and barista statistics
//! - **`simulation`**: Synthetic workloads and multi-case stress runs
//! - **`validation`**: Input integrity checks for orders and pool configuration
//! - **`complaints`**: Append-only customer feedback log
//! - **`api`**: HTTP surface (axum) over a shared `Dispatcher`
//!
//! # Priority formula
//!
//! ```text
//! priority = 100 × (0.40·wait + 0.25·complexity + 0.10·loyalty + 0.25·urgency)
//! ```
//!
//! Every sub-score is normalised to `[0, 1]`.

pub mod api;
pub mod clock;
pub mod complaints;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fairness;
pub mod models;
pub mod priority;
pub mod simulation;
pub mod stats;
pub mod validation;

pub use error::DispatchError;
