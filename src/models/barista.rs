//! Barista (worker) model.
//!
//! The pool is fixed at construction time. A barista prepares at most one
//! order at a time; `available` is true iff nothing is in progress.

use serde::{Deserialize, Serialize};

use super::OrderId;

/// Barista identifier (1-based, assigned in pool order).
pub type BaristaId = u64;

/// A barista in the fixed worker pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barista {
    /// Unique barista identifier.
    pub id: BaristaId,
    /// Display name.
    pub name: String,
    /// True iff no order is in progress.
    pub available: bool,
    /// Order currently being prepared.
    pub current_order: Option<OrderId>,
    /// Every order ever handed to this barista, oldest first.
    pub assigned_orders: Vec<OrderId>,
    /// Prep minutes of assigned, not yet finished orders.
    pub total_pending_minutes: u32,
    /// Pending minutes relative to the pool mean (1.0 = balanced).
    pub workload_ratio: f64,
    /// Lifetime completed orders.
    pub orders_completed: u32,
    /// Lifetime prep minutes of completed orders.
    pub total_workload_minutes: u32,
}

impl Barista {
    /// Creates an idle barista.
    pub fn new(id: BaristaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            available: true,
            current_order: None,
            assigned_orders: Vec::new(),
            total_pending_minutes: 0,
            workload_ratio: 1.0,
            orders_completed: 0,
            total_workload_minutes: 0,
        }
    }

    /// Average prep minutes per completed order (0 when none).
    pub fn avg_time_per_order(&self) -> f64 {
        if self.orders_completed == 0 {
            0.0
        } else {
            self.total_workload_minutes as f64 / self.orders_completed as f64
        }
    }

    pub(crate) fn start(&mut self, order_id: OrderId) {
        self.available = false;
        self.current_order = Some(order_id);
        self.assigned_orders.push(order_id);
    }

    /// Frees the barista, returning the order that was in progress.
    pub(crate) fn release(&mut self) -> Option<OrderId> {
        self.available = true;
        self.current_order.take()
    }
}
