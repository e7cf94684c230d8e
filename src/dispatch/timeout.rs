//! Timeout monitor.
//!
//! Runs on its own schedule, independent of dispatch ticks. Wait is always
//! measured from arrival, for queued and in-progress orders alike.

use serde::Serialize;
use tracing::warn;

use super::Dispatcher;
use crate::models::{AlertTag, OrderId, OrderStatus};

/// An order expired by a sweep, with what a complaint about it needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiredOrder {
    pub order_id: OrderId,
    pub drink_name: String,
    pub username: Option<String>,
    /// Barista that held the order, if it was in progress.
    pub barista_name: Option<String>,
    pub wait_minutes: f64,
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Orders expired by this sweep, in id order.
    pub expired: Vec<ExpiredOrder>,
    /// Whether a tick ran because a barista was freed.
    pub ticked: bool,
}

impl SweepReport {
    /// Ids of the expired orders.
    pub fn order_ids(&self) -> Vec<OrderId> {
        self.expired.iter().map(|e| e.order_id).collect()
    }
}

impl Dispatcher {
    /// Expires every active order whose wait reached the service deadline.
    ///
    /// Each expiry bumps the timeout counter and raises a CRITICAL alert.
    /// Baristas freed this way trigger one tick at the end of the sweep.
    /// Queued orders that crossed the urgency onset get their WARNING here
    /// too.
    pub fn sweep_timeouts(&mut self, now_ms: i64) -> SweepReport {
        let deadline_ms = self.config.service_deadline_ms();
        let due: Vec<OrderId> = self
            .orders
            .values()
            .filter(|o| o.status.is_active() && o.wait_ms(now_ms) >= deadline_ms)
            .map(|o| o.id)
            .collect();

        let mut expired = Vec::with_capacity(due.len());
        let mut freed = false;
        for order_id in due {
            if let Some((order, released)) = self.expire(order_id, now_ms) {
                freed |= released;
                expired.push(order);
            }
        }
        self.warn_approaching(now_ms);

        let ticked = freed;
        if ticked {
            self.tick(now_ms);
        }
        SweepReport { expired, ticked }
    }

    /// Raises one WARNING per queued order that reached the urgency onset.
    pub(super) fn warn_approaching(&mut self, now_ms: i64) {
        let onset_ms = self.config.urgency_onset_ms();
        for id in &self.queue {
            let Some(order) = self.orders.get_mut(id) else {
                continue;
            };
            if order.deadline_warned || order.wait_ms(now_ms) < onset_ms {
                continue;
            }
            order.deadline_warned = true;
            self.alerts.push(
                AlertTag::Warning,
                format!(
                    "Order #{} approaching timeout ({:.1} min wait)",
                    order.id,
                    order.wait_minutes(now_ms)
                ),
                now_ms,
            );
        }
    }

    /// Moves one order to TIMED_OUT. The flag is true if a barista was freed.
    fn expire(&mut self, order_id: OrderId, now_ms: i64) -> Option<(ExpiredOrder, bool)> {
        let order = self.orders.get_mut(&order_id)?;
        let was_in_progress = order.status == OrderStatus::InProgress;
        order.status = OrderStatus::TimedOut;
        order.finished_at_ms = Some(now_ms);

        let wait = order.wait_minutes(now_ms);
        let message = format!(
            "Order #{} ({}) timed out after {:.1} min",
            order.id, order.drink_name, wait
        );
        let minutes = order.prep_time_minutes;
        let barista_id = order.assigned_barista_id.filter(|_| was_in_progress);
        let mut expired = ExpiredOrder {
            order_id,
            drink_name: order.drink_name.clone(),
            username: order.username.clone(),
            barista_name: None,
            wait_minutes: wait,
        };

        warn!(order_id, wait_minutes = wait, was_in_progress, "Order timed out");
        self.timeout_count += 1;
        self.alerts.push(AlertTag::Critical, message, now_ms);
        self.queue.retain(|&id| id != order_id);
        self.fairness.forget_order(order_id);

        let Some(barista_id) = barista_id else {
            return Some((expired, false));
        };
        expired.barista_name = self
            .baristas
            .iter()
            .find(|b| b.id == barista_id)
            .map(|b| b.name.clone());
        self.abandon(barista_id, minutes);
        Some((expired, true))
    }
}
