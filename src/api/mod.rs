//! HTTP surface.
//!
//! JSON over HTTP (axum) in front of one shared [`Dispatcher`](crate::dispatch::Dispatcher).
//! Every mutating request and the background monitor go through the same
//! write lock, so ticks never interleave.

pub mod background;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

pub use error::{AppError, AppResult};
pub use extract::{AppJson, AppPath, AppQuery};
pub use router::build_app_router;
pub use state::AppState;
