//! Read-side statistics.
//!
//! Pure views over a [`Dispatcher`]; nothing here mutates state, so they
//! are safe to compute on every poll.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Queue Size | Orders currently QUEUED |
//! | In Progress | Orders currently IN_PROGRESS |
//! | Completed | Lifetime COMPLETED orders |
//! | Avg Wait | Mean of (finish - arrival) over COMPLETED orders, minutes |
//! | Timeouts | Lifetime TIMED_OUT orders |
//! | Workloads | Per-barista pending minutes and ratio |
//!
//! A `username` filter narrows the order-based metrics to that user's
//! orders. Barista workloads always cover the whole pool.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dispatch::Dispatcher;
use crate::models::{Barista, BaristaId, Order, OrderStatus};

/// One barista's entry in the workload map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadEntry {
    pub pending_minutes: u32,
    pub ratio: f64,
}

/// Queue summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub queue_size: usize,
    pub in_progress_count: usize,
    pub completed_count: u64,
    /// Mean arrival-to-completion time of completed orders (minutes).
    pub average_wait_minutes: f64,
    pub timeout_count: u64,
    /// Keyed by barista name.
    pub barista_workloads: BTreeMap<String, WorkloadEntry>,
}

impl QueueStats {
    /// Computes the summary, optionally for one user's orders.
    pub fn calculate(dispatcher: &Dispatcher, username: Option<&str>) -> Self {
        let owned = |o: &&Order| username.map_or(true, |u| o.is_owned_by(u));
        let orders: Vec<&Order> = dispatcher.orders().filter(owned).collect();
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

        let turnarounds: Vec<f64> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .filter_map(|o| o.turnaround_minutes())
            .collect();
        let average_wait_minutes = if turnarounds.is_empty() {
            0.0
        } else {
            turnarounds.iter().sum::<f64>() / turnarounds.len() as f64
        };

        let (completed_count, timeout_count) = match username {
            None => (dispatcher.completed_count(), dispatcher.timeout_count()),
            Some(_) => (
                count(OrderStatus::Completed) as u64,
                count(OrderStatus::TimedOut) as u64,
            ),
        };

        let barista_workloads = dispatcher
            .baristas()
            .iter()
            .map(|b| {
                (
                    b.name.clone(),
                    WorkloadEntry {
                        pending_minutes: b.total_pending_minutes,
                        ratio: b.workload_ratio,
                    },
                )
            })
            .collect();

        Self {
            queue_size: count(OrderStatus::Queued),
            in_progress_count: count(OrderStatus::InProgress),
            completed_count,
            average_wait_minutes,
            timeout_count,
            barista_workloads,
        }
    }
}

/// Lifetime figures for one barista.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaristaStats {
    pub id: BaristaId,
    pub name: String,
    pub orders_completed: u32,
    pub total_workload_minutes: u32,
    pub avg_time_per_order: f64,
    pub workload_ratio: f64,
    /// Orders that timed out while this barista was preparing them.
    pub timeouts: u32,
    pub available: bool,
}

impl BaristaStats {
    /// Computes per-barista figures for the whole pool, in id order.
    pub fn calculate(dispatcher: &Dispatcher) -> Vec<Self> {
        dispatcher
            .baristas()
            .iter()
            .map(|b| Self::for_barista(b, dispatcher))
            .collect()
    }

    fn for_barista(barista: &Barista, dispatcher: &Dispatcher) -> Self {
        let timeouts = dispatcher
            .orders()
            .filter(|o| {
                o.status == OrderStatus::TimedOut && o.assigned_barista_id == Some(barista.id)
            })
            .count() as u32;

        Self {
            id: barista.id,
            name: barista.name.clone(),
            orders_completed: barista.orders_completed,
            total_workload_minutes: barista.total_workload_minutes,
            avg_time_per_order: barista.avg_time_per_order(),
            workload_ratio: barista.workload_ratio,
            timeouts,
            available: barista.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchConfig;
    use crate::models::{NewOrder, MS_PER_MINUTE};

    fn engine() -> Dispatcher {
        Dispatcher::new(DispatchConfig::default().with_baristas(["Alice", "Bob"])).unwrap()
    }

    #[test]
    fn test_empty_engine() {
        let stats = QueueStats::calculate(&engine(), None);
        assert_eq!(stats.queue_size, 0);
        assert_eq!(stats.completed_count, 0);
        assert!((stats.average_wait_minutes - 0.0).abs() < 1e-10);
        assert_eq!(stats.barista_workloads.len(), 2);
        assert!((stats.barista_workloads["Alice"].ratio - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_average_wait_over_completed() {
        let mut d = engine();
        d.submit(NewOrder::new("Espresso", 2), 0).unwrap();
        d.submit(NewOrder::new("Mocha", 6), MS_PER_MINUTE).unwrap();
        d.submit(NewOrder::new("Latte", 5), MS_PER_MINUTE).unwrap();
        d.complete(1, 2 * MS_PER_MINUTE).unwrap(); // order 3 starts now
        d.complete(2, 7 * MS_PER_MINUTE).unwrap();

        let stats = QueueStats::calculate(&d, None);
        // (2 - 0) and (7 - 1) minutes
        assert!((stats.average_wait_minutes - 4.0).abs() < 1e-10);
        assert_eq!(stats.completed_count, 2);
        assert_eq!(stats.in_progress_count, 1);
        assert_eq!(stats.queue_size, 0);
    }

    #[test]
    fn test_username_filter() {
        let mut d = engine();
        d.submit(NewOrder::new("Latte", 5).with_username("ana"), 0).unwrap();
        d.submit(NewOrder::new("Latte", 5).with_username("ben"), 0).unwrap();
        d.submit(NewOrder::new("Latte", 5).with_username("ana"), 0).unwrap();
        d.sweep_timeouts(8 * MS_PER_MINUTE);

        let ana = QueueStats::calculate(&d, Some("ana"));
        assert_eq!(ana.timeout_count, 2);
        let ben = QueueStats::calculate(&d, Some("ben"));
        assert_eq!(ben.timeout_count, 1);
        let all = QueueStats::calculate(&d, None);
        assert_eq!(all.timeout_count, 3);
        assert_eq!(ana.barista_workloads.len(), 2);
    }

    #[test]
    fn test_barista_stats() {
        let mut d = engine();
        d.submit(NewOrder::new("Latte", 5), 0).unwrap();
        d.submit(NewOrder::new("Mocha", 6), 0).unwrap();
        d.complete(1, 5 * MS_PER_MINUTE).unwrap();
        d.sweep_timeouts(8 * MS_PER_MINUTE);

        let stats = BaristaStats::calculate(&d);
        assert_eq!(stats.len(), 2);
        let alice = &stats[0];
        let bob = &stats[1];
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.orders_completed, 1);
        assert_eq!(alice.timeouts, 0);
        assert!((alice.avg_time_per_order - 5.0).abs() < 1e-10);
        assert_eq!(bob.orders_completed, 0);
        assert_eq!(bob.timeouts, 1);
        assert!(alice.available && bob.available);
    }
}
