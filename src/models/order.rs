//! Order model.
//!
//! An order is a single drink request moving through
//! `QUEUED → IN_PROGRESS → COMPLETED`, with `TIMED_OUT` as the escape
//! transition from either active state.

use serde::{Deserialize, Serialize};

use super::BaristaId;

/// Unique, monotonically assigned order identifier.
pub type OrderId = u64;

/// Milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60_000;

/// Prep-time buckets (minutes) accepted by the bar.
pub const ALLOWED_PREP_TIMES: [u32; 6] = [2, 3, 4, 5, 6, 8];

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Waiting in the ranked queue.
    Queued,
    /// Being prepared by exactly one barista.
    InProgress,
    /// Finished by its barista.
    Completed,
    /// Expired by the timeout monitor.
    TimedOut,
}

impl OrderStatus {
    /// Whether the order can still change state.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Queued | Self::InProgress)
    }

    /// Whether the order reached a final state.
    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

/// A drink order tracked by the dispatcher.
///
/// Clones handed out by the engine are snapshots; mutating them has no
/// effect on scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Drink display name.
    pub drink_name: String,
    /// Preparation time in minutes (one of [`ALLOWED_PREP_TIMES`]).
    pub prep_time_minutes: u32,
    /// Loyalty tier, 1 (new) to 5 (VIP).
    pub loyalty_tier: u8,
    /// Whether the customer is a known regular.
    pub is_regular_customer: bool,
    /// Submitting user, if any.
    pub username: Option<String>,
    /// Submission timestamp (ms). Never changes.
    #[serde(rename = "arrivalTime")]
    pub arrival_time_ms: i64,
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// Ticks in which the order was ranked but not dispatched.
    pub skip_count: u32,
    /// Last computed priority (0–100).
    pub priority: f64,
    /// Breakdown of the last computed priority.
    pub priority_explanation: String,
    /// Barista that took the order. Kept after completion for history.
    #[serde(rename = "assignedBaristaId")]
    pub assigned_barista_id: Option<BaristaId>,
    /// When preparation started (ms).
    #[serde(rename = "startedAt")]
    pub started_at_ms: Option<i64>,
    /// When the order completed or timed out (ms).
    #[serde(rename = "finishedAt")]
    pub finished_at_ms: Option<i64>,
    #[serde(skip)]
    pub(crate) deadline_warned: bool,
}

impl Order {
    /// Creates a queued order from a validated request.
    pub(crate) fn from_request(id: OrderId, request: NewOrder, arrival_time_ms: i64) -> Self {
        Self {
            id,
            drink_name: request.drink_name.trim().to_string(),
            prep_time_minutes: request.prep_time_minutes as u32,
            loyalty_tier: request.loyalty_tier as u8,
            is_regular_customer: request.is_regular_customer,
            username: request
                .username
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
            arrival_time_ms,
            status: OrderStatus::Queued,
            skip_count: 0,
            priority: 0.0,
            priority_explanation: String::new(),
            assigned_barista_id: None,
            started_at_ms: None,
            finished_at_ms: None,
            deadline_warned: false,
        }
    }

    /// Elapsed time since arrival (ms), never negative.
    pub fn wait_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.arrival_time_ms).max(0)
    }

    /// Elapsed time since arrival in minutes.
    pub fn wait_minutes(&self, now_ms: i64) -> f64 {
        self.wait_ms(now_ms) as f64 / MS_PER_MINUTE as f64
    }

    /// Preparation time in ms.
    pub fn prep_ms(&self) -> i64 {
        self.prep_time_minutes as i64 * MS_PER_MINUTE
    }

    /// Timestamp at which preparation will be done, if started.
    pub fn ready_at_ms(&self) -> Option<i64> {
        self.started_at_ms.map(|s| s + self.prep_ms())
    }

    /// Whether this order belongs to `username`.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username.as_deref() == Some(username)
    }

    /// Total turnaround (arrival → finish) in minutes, once finished.
    pub fn turnaround_minutes(&self) -> Option<f64> {
        self.finished_at_ms
            .map(|f| (f - self.arrival_time_ms).max(0) as f64 / MS_PER_MINUTE as f64)
    }
}

/// Order submission request.
///
/// Numeric fields are signed so that out-of-range input reaches validation
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Drink display name.
    pub drink_name: String,
    /// Preparation time in minutes.
    pub prep_time_minutes: i32,
    /// Loyalty tier (default: 1).
    #[serde(default = "default_loyalty_tier")]
    pub loyalty_tier: i32,
    /// Regular customer flag (default: false).
    #[serde(default)]
    pub is_regular_customer: bool,
    /// Submitting user.
    #[serde(default)]
    pub username: Option<String>,
}

fn default_loyalty_tier() -> i32 {
    1
}

impl NewOrder {
    /// Creates a request for a first-time, tier-1 customer.
    pub fn new(drink_name: impl Into<String>, prep_time_minutes: i32) -> Self {
        Self {
            drink_name: drink_name.into(),
            prep_time_minutes,
            loyalty_tier: default_loyalty_tier(),
            is_regular_customer: false,
            username: None,
        }
    }

    /// Sets the loyalty tier.
    pub fn with_loyalty_tier(mut self, tier: i32) -> Self {
        self.loyalty_tier = tier;
        self
    }

    /// Marks the customer as a regular.
    pub fn regular(mut self, is_regular: bool) -> Self {
        self.is_regular_customer = is_regular;
        self
    }

    /// Sets the submitting user.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_request() {
        let req = NewOrder::new("  Latte ", 5)
            .with_loyalty_tier(4)
            .regular(true)
            .with_username("ana");
        let order = Order::from_request(7, req, 1_000);

        assert_eq!(order.id, 7);
        assert_eq!(order.drink_name, "Latte");
        assert_eq!(order.prep_time_minutes, 5);
        assert_eq!(order.loyalty_tier, 4);
        assert!(order.is_regular_customer);
        assert_eq!(order.status, OrderStatus::Queued);
        assert_eq!(order.skip_count, 0);
        assert!(order.is_owned_by("ana"));
        assert!(!order.is_owned_by("bo"));
    }

    #[test]
    fn test_username_is_trimmed() {
        let order = Order::from_request(1, NewOrder::new("Latte", 5).with_username(" ana "), 0);
        assert_eq!(order.username.as_deref(), Some("ana"));
        assert!(order.is_owned_by("ana"));

        let blank = Order::from_request(2, NewOrder::new("Latte", 5).with_username("   "), 0);
        assert_eq!(blank.username, None);
    }

    #[test]
    fn test_wait_time() {
        let order = Order::from_request(1, NewOrder::new("Mocha", 6), 10_000);
        assert_eq!(order.wait_ms(5_000), 0);
        assert_eq!(order.wait_ms(10_000 + 90_000), 90_000);
        assert!((order.wait_minutes(10_000 + 90_000) - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_ready_at() {
        let mut order = Order::from_request(1, NewOrder::new("Espresso", 2), 0);
        assert_eq!(order.ready_at_ms(), None);
        order.started_at_ms = Some(30_000);
        assert_eq!(order.ready_at_ms(), Some(30_000 + 2 * MS_PER_MINUTE));
    }

    #[test]
    fn test_status_classification() {
        assert!(OrderStatus::Queued.is_active());
        assert!(OrderStatus::InProgress.is_active());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::TimedOut.is_terminal());
    }

    #[test]
    fn test_request_defaults_from_json() {
        let req: NewOrder =
            serde_json::from_str(r#"{"drinkName":"Americano","prepTimeMinutes":3}"#).unwrap();
        assert_eq!(req.loyalty_tier, 1);
        assert!(!req.is_regular_customer);
        assert_eq!(req.username, None);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }
}
