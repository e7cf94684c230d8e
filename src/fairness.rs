//! Fairness tracking: per-order skip counters and per-barista workload.
//!
//! The tracker only records readings. Alerts derived from them are raised
//! by the dispatcher.
//!
//! # Workload ratio
//!
//! ```text
//! ratio(b) = pending_minutes(b) / mean(pending_minutes over the whole pool)
//! ```
//!
//! When the whole pool is idle the mean is zero and every ratio is 1.0.

use std::collections::{BTreeMap, HashMap};

use crate::models::{BaristaId, OrderId};

/// Skip counters and workload readings.
#[derive(Debug, Clone, Default)]
pub struct FairnessTracker {
    skips: HashMap<OrderId, u32>,
    pending_minutes: BTreeMap<BaristaId, u32>,
    ratios: BTreeMap<BaristaId, f64>,
}

impl FairnessTracker {
    /// Creates a tracker for a fixed pool.
    pub fn new(barista_ids: impl IntoIterator<Item = BaristaId>) -> Self {
        let pending_minutes: BTreeMap<BaristaId, u32> =
            barista_ids.into_iter().map(|id| (id, 0)).collect();
        let mut tracker = Self {
            skips: HashMap::new(),
            pending_minutes,
            ratios: BTreeMap::new(),
        };
        tracker.recompute_ratios();
        tracker
    }

    /// Records one skip for an order and returns its new count.
    pub fn record_skip(&mut self, order_id: OrderId) -> u32 {
        let count = self.skips.entry(order_id).or_insert(0);
        *count += 1;
        *count
    }

    /// Skips recorded for an order (0 if never skipped).
    pub fn skip_count(&self, order_id: OrderId) -> u32 {
        self.skips.get(&order_id).copied().unwrap_or(0)
    }

    /// Drops the skip counter of an order that left the queue.
    ///
    /// The order keeps its own frozen copy of the count.
    pub fn forget_order(&mut self, order_id: OrderId) {
        self.skips.remove(&order_id);
    }

    /// Number of orders with a live skip counter.
    pub fn tracked_orders(&self) -> usize {
        self.skips.len()
    }

    /// Adds pending work to a barista and recomputes ratios.
    pub fn record_assignment(&mut self, barista_id: BaristaId, minutes: u32) {
        if let Some(pending) = self.pending_minutes.get_mut(&barista_id) {
            *pending += minutes;
        }
        self.recompute_ratios();
    }

    /// Removes finished (or expired) work from a barista and recomputes ratios.
    pub fn record_release(&mut self, barista_id: BaristaId, minutes: u32) {
        if let Some(pending) = self.pending_minutes.get_mut(&barista_id) {
            *pending = pending.saturating_sub(minutes);
        }
        self.recompute_ratios();
    }

    /// Pending prep minutes of a barista.
    pub fn pending_minutes(&self, barista_id: BaristaId) -> u32 {
        self.pending_minutes.get(&barista_id).copied().unwrap_or(0)
    }

    /// Workload ratio of a barista (1.0 for unknown ids or an idle pool).
    pub fn worker_workload(&self, barista_id: BaristaId) -> f64 {
        self.ratios.get(&barista_id).copied().unwrap_or(1.0)
    }

    /// Mean pending minutes across the pool.
    pub fn mean_pending_minutes(&self) -> f64 {
        if self.pending_minutes.is_empty() {
            return 0.0;
        }
        let total: u32 = self.pending_minutes.values().sum();
        total as f64 / self.pending_minutes.len() as f64
    }

    /// Baristas whose ratio exceeds `threshold`, in id order.
    pub fn overloaded(&self, threshold: f64) -> Vec<BaristaId> {
        self.ratios
            .iter()
            .filter(|(_, &ratio)| ratio > threshold)
            .map(|(&id, _)| id)
            .collect()
    }

    fn recompute_ratios(&mut self) {
        let mean = self.mean_pending_minutes();
        self.ratios = self
            .pending_minutes
            .iter()
            .map(|(&id, &pending)| {
                let ratio = if mean > 0.0 { pending as f64 / mean } else { 1.0 };
                (id, ratio)
            })
            .collect();
    }
}
