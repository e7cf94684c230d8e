//! Dispatch domain models.
//!
//! Provides the core data types shared by the engine, the simulator and the
//! HTTP layer.
//!
//! # Time Representation
//! All timestamps are milliseconds since the Unix epoch (`i64`). The engine
//! never reads the wall clock itself; callers pass `now_ms` explicitly.

mod alert;
mod barista;
mod complaint;
mod order;

pub use alert::{Alert, AlertLog, AlertTag};
pub use barista::{Barista, BaristaId};
pub use complaint::{Complaint, NewComplaint};
pub use order::{NewOrder, Order, OrderId, OrderStatus, ALLOWED_PREP_TIMES, MS_PER_MINUTE};
