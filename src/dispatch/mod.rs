//! Dispatch engine.
//!
//! # Algorithm
//!
//! One tick runs to completion before the next starts:
//!
//! 1. Raise a WARNING for queued orders that reached the urgency onset.
//! 2. Rescore every queued order (priority + explanation).
//! 3. Rank: priority descending, earlier arrival, lower id.
//! 4. Offer the top orders to available baristas, least loaded first
//!    (workload ratio, then lifetime minutes handled, then id).
//! 5. Every ranked order left over records one skip.
//! 6. If anything was assigned, raise a FAIRNESS alert for each barista
//!    whose workload ratio exceeds the threshold.
//!
//! Ticks are triggered by submissions, completions, timeouts freeing a
//! barista, and a fixed interval ([`Dispatcher::tick_if_due`]).
//!
//! # Complexity
//! O(n log n + w log w) per tick where n=queued orders, w=baristas.

mod timeout;

pub use timeout::{ExpiredOrder, SweepReport};

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::fairness::FairnessTracker;
use crate::models::{
    AlertLog, AlertTag, Barista, BaristaId, NewOrder, Order, OrderId, OrderStatus,
};
use crate::priority::{compare_ranked, PriorityCalculator, ScoringContext};
use crate::validation::{validate_config, validate_order};

/// One order handed to one barista.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub order_id: OrderId,
    pub barista_id: BaristaId,
}

/// Outcome of one scheduling tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    /// Orders dispatched this tick, in rank order.
    pub assigned: Vec<Assignment>,
    /// Orders ranked but left queued, in rank order.
    pub skipped: Vec<OrderId>,
}

/// The scheduler: live queue, barista pool, fairness counters and alert log.
///
/// All mutation goes through `&mut self`, so one tick always finishes
/// before another begins. The engine never reads the wall clock; every
/// operation takes `now_ms`.
///
/// # Example
/// ```
/// use cafe_dispatch::config::DispatchConfig;
/// use cafe_dispatch::dispatch::Dispatcher;
/// use cafe_dispatch::models::{NewOrder, OrderStatus};
///
/// let mut dispatcher = Dispatcher::new(DispatchConfig::default()).unwrap();
/// let order = dispatcher.submit(NewOrder::new("Latte", 5), 0).unwrap();
/// assert_eq!(order.status, OrderStatus::InProgress);
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: DispatchConfig,
    calculator: PriorityCalculator,
    fairness: FairnessTracker,
    orders: BTreeMap<OrderId, Order>,
    /// Queued order ids in arrival order.
    queue: Vec<OrderId>,
    baristas: Vec<Barista>,
    alerts: AlertLog,
    completed_count: u64,
    timeout_count: u64,
    next_order_id: OrderId,
    last_tick_ms: Option<i64>,
    ticks: u64,
}

impl Dispatcher {
    /// Creates an engine with the configured barista pool (ids from 1).
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        validate_config(&config)?;

        let baristas: Vec<Barista> = config
            .barista_names
            .iter()
            .enumerate()
            .map(|(i, name)| Barista::new(i as BaristaId + 1, name.trim()))
            .collect();
        let fairness = FairnessTracker::new(baristas.iter().map(|b| b.id));

        info!(baristas = baristas.len(), "Dispatcher initialized");

        Ok(Self {
            config,
            calculator: PriorityCalculator::new(),
            fairness,
            orders: BTreeMap::new(),
            queue: Vec::new(),
            baristas,
            alerts: AlertLog::new(),
            completed_count: 0,
            timeout_count: 0,
            next_order_id: 1,
            last_tick_ms: None,
            ticks: 0,
        })
    }

    /// Validates and enqueues an order, then runs a tick.
    ///
    /// Returns a snapshot of the order after that tick, so it may already
    /// be in progress.
    pub fn submit(&mut self, request: NewOrder, now_ms: i64) -> Result<Order, DispatchError> {
        validate_order(&request)?;

        let id = self.next_order_id;
        self.next_order_id += 1;
        let order = Order::from_request(id, request, now_ms);
        info!(
            order_id = id,
            drink = %order.drink_name,
            prep_minutes = order.prep_time_minutes,
            tier = order.loyalty_tier,
            "Order submitted"
        );
        self.orders.insert(id, order);
        self.queue.push(id);

        self.tick(now_ms);
        self.order(id).cloned()
    }

    /// Runs one scheduling tick.
    pub fn tick(&mut self, now_ms: i64) -> TickReport {
        self.ticks += 1;
        self.last_tick_ms = Some(now_ms);

        self.warn_approaching(now_ms);
        let context = ScoringContext::from_config(&self.config, now_ms);
        let queued = self.queue.clone();
        self.rescore(&queued, &context);

        let mut ranked = self.ranked_queue();
        let free = self.available_baristas();
        let dispatched = free.len().min(ranked.len());
        let skipped = ranked.split_off(dispatched);

        let mut report = TickReport::default();
        for (&order_id, &barista_id) in ranked.iter().zip(&free) {
            self.assign(order_id, barista_id, now_ms);
            report.assigned.push(Assignment {
                order_id,
                barista_id,
            });
        }

        for &order_id in &skipped {
            self.skip(order_id, now_ms);
        }
        // Keep priority and explanation in step with the new skip counts.
        self.rescore(&skipped, &context);
        report.skipped = skipped;

        if !report.assigned.is_empty() {
            self.check_workload_balance(now_ms);
        }

        debug!(
            tick = self.ticks,
            assigned = report.assigned.len(),
            skipped = report.skipped.len(),
            "Tick complete"
        );
        report
    }

    /// Runs a tick if the interval has elapsed since the last one.
    pub fn tick_if_due(&mut self, now_ms: i64) -> Option<TickReport> {
        let due = match self.last_tick_ms {
            Some(last) => now_ms - last >= self.config.tick_interval_ms,
            None => true,
        };
        due.then(|| self.tick(now_ms))
    }

    /// Completion signal from a barista: finishes its order, then ticks.
    ///
    /// # Errors
    /// - `NotFound` for an unknown barista id
    /// - `StateConflict` if the barista has nothing in progress
    pub fn complete(&mut self, barista_id: BaristaId, now_ms: i64) -> Result<Order, DispatchError> {
        let order_id = self.finish_current(barista_id, now_ms)?;
        self.tick(now_ms);
        self.order(order_id).cloned()
    }

    /// Completes every in-progress order whose prep time has elapsed.
    ///
    /// Runs one tick afterwards if anything finished.
    pub fn complete_due(&mut self, now_ms: i64) -> Vec<OrderId> {
        let due: Vec<BaristaId> = self
            .baristas
            .iter()
            .filter(|b| {
                b.current_order
                    .and_then(|id| self.orders.get(&id))
                    .and_then(Order::ready_at_ms)
                    .is_some_and(|ready| ready <= now_ms)
            })
            .map(|b| b.id)
            .collect();

        let finished: Vec<OrderId> = due
            .into_iter()
            .filter_map(|barista_id| self.finish_current(barista_id, now_ms).ok())
            .collect();

        if !finished.is_empty() {
            self.tick(now_ms);
        }
        finished
    }

    // ======================== Readers ========================

    /// Looks up any known order.
    pub fn order(&self, id: OrderId) -> Result<&Order, DispatchError> {
        self.orders
            .get(&id)
            .ok_or(DispatchError::NotFound { entity: "order", id })
    }

    /// Every order ever submitted, by id.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Live queue snapshot: queued orders in rank order, then in-progress
    /// orders by start time. Optionally limited to one user's orders.
    pub fn queue(&self, username: Option<&str>) -> Vec<Order> {
        let owned = |o: &&Order| username.map_or(true, |u| o.is_owned_by(u));

        let mut queued: Vec<&Order> = self
            .queue
            .iter()
            .filter_map(|id| self.orders.get(id))
            .filter(owned)
            .collect();
        queued.sort_by(|a, b| compare_ranked(a, b));

        let mut in_progress: Vec<&Order> = self
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::InProgress)
            .filter(owned)
            .collect();
        in_progress.sort_by_key(|o| (o.started_at_ms, o.id));

        queued.into_iter().chain(in_progress).cloned().collect()
    }

    /// Number of queued orders.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// The barista pool, in id order.
    pub fn baristas(&self) -> &[Barista] {
        &self.baristas
    }

    /// Looks up a barista.
    pub fn barista(&self, id: BaristaId) -> Result<&Barista, DispatchError> {
        self.baristas
            .iter()
            .find(|b| b.id == id)
            .ok_or(DispatchError::NotFound {
                entity: "barista",
                id,
            })
    }

    /// The alert log.
    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    /// Lifetime completed orders.
    pub fn completed_count(&self) -> u64 {
        self.completed_count
    }

    /// Lifetime timed-out orders.
    pub fn timeout_count(&self) -> u64 {
        self.timeout_count
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Time of the last tick, if any.
    pub fn last_tick_ms(&self) -> Option<i64> {
        self.last_tick_ms
    }

    /// Whether no order is queued or in progress.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.baristas.iter().all(|b| b.available)
    }

    /// Engine tunables.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Fairness readings.
    pub fn fairness(&self) -> &FairnessTracker {
        &self.fairness
    }

    // ======================== Internals ========================

    fn rescore(&mut self, ids: &[OrderId], context: &ScoringContext) {
        for id in ids {
            if let Some(order) = self.orders.get_mut(id) {
                let breakdown = self.calculator.score(order, context);
                order.priority = breakdown.priority;
                order.priority_explanation = breakdown.explanation;
            }
        }
    }

    fn ranked_queue(&self) -> Vec<OrderId> {
        let mut queued: Vec<&Order> = self
            .queue
            .iter()
            .filter_map(|id| self.orders.get(id))
            .collect();
        self.calculator.rank(&mut queued);
        queued.into_iter().map(|o| o.id).collect()
    }

    fn available_baristas(&self) -> Vec<BaristaId> {
        let mut free: Vec<&Barista> = self.baristas.iter().filter(|b| b.available).collect();
        free.sort_by(|a, b| {
            a.workload_ratio
                .partial_cmp(&b.workload_ratio)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.total_workload_minutes.cmp(&b.total_workload_minutes))
                .then(a.id.cmp(&b.id))
        });
        free.into_iter().map(|b| b.id).collect()
    }

    fn assign(&mut self, order_id: OrderId, barista_id: BaristaId, now_ms: i64) {
        let Some(order) = self.orders.get_mut(&order_id) else {
            return;
        };
        order.status = OrderStatus::InProgress;
        order.assigned_barista_id = Some(barista_id);
        order.started_at_ms = Some(now_ms);
        let minutes = order.prep_time_minutes;

        if let Some(barista) = self.baristas.iter_mut().find(|b| b.id == barista_id) {
            barista.start(order_id);
            debug!(order_id, barista = %barista.name, minutes, "Order assigned");
        }
        self.queue.retain(|&id| id != order_id);
        self.fairness.forget_order(order_id);
        self.fairness.record_assignment(barista_id, minutes);
        self.refresh_workloads();
    }

    fn skip(&mut self, order_id: OrderId, now_ms: i64) {
        let count = self.fairness.record_skip(order_id);
        if let Some(order) = self.orders.get_mut(&order_id) {
            order.skip_count = count;
        }
        if count == self.config.skip_alert_threshold + 1 {
            self.alerts.push(
                AlertTag::Fairness,
                format!("Order #{order_id} has been skipped {count} times"),
                now_ms,
            );
        }
        debug!(order_id, skips = count, "Order skipped");
    }

    /// Moves a barista's in-progress order to COMPLETED and frees them.
    fn finish_current(
        &mut self,
        barista_id: BaristaId,
        now_ms: i64,
    ) -> Result<OrderId, DispatchError> {
        let barista = self
            .baristas
            .iter_mut()
            .find(|b| b.id == barista_id)
            .ok_or(DispatchError::NotFound {
                entity: "barista",
                id: barista_id,
            })?;
        let order_id = barista.release().ok_or_else(|| {
            DispatchError::StateConflict(format!(
                "barista {} has no order in progress",
                barista.name
            ))
        })?;

        let minutes = match self.orders.get_mut(&order_id) {
            Some(order) => {
                order.status = OrderStatus::Completed;
                order.finished_at_ms = Some(now_ms);
                order.prep_time_minutes
            }
            None => 0,
        };
        barista.orders_completed += 1;
        barista.total_workload_minutes += minutes;
        info!(order_id, barista = %barista.name, "Order completed");

        self.completed_count += 1;
        self.fairness.record_release(barista_id, minutes);
        self.refresh_workloads();
        Ok(order_id)
    }

    /// Frees the barista working on a timed-out order.
    fn abandon(&mut self, barista_id: BaristaId, minutes: u32) {
        if let Some(barista) = self.baristas.iter_mut().find(|b| b.id == barista_id) {
            barista.release();
        }
        self.fairness.record_release(barista_id, minutes);
        self.refresh_workloads();
    }

    fn refresh_workloads(&mut self) {
        for barista in &mut self.baristas {
            barista.total_pending_minutes = self.fairness.pending_minutes(barista.id);
            barista.workload_ratio = self.fairness.worker_workload(barista.id);
        }
    }

    fn check_workload_balance(&mut self, now_ms: i64) {
        let threshold = self.config.fairness_ratio_threshold;
        for barista_id in self.fairness.overloaded(threshold) {
            let Some(barista) = self.baristas.iter().find(|b| b.id == barista_id) else {
                continue;
            };
            let message = format!(
                "Barista {} workload ratio {:.2} exceeds {}",
                barista.name, barista.workload_ratio, threshold
            );
            self.alerts.push(AlertTag::Fairness, message, now_ms);
        }
    }
}
