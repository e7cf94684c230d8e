//! Order priority scoring.
//!
//! Four weighted score terms combine into a 0–100 priority with a
//! human-readable breakdown:
//!
//! ```text
//! priority = 100 × (0.40·wait + 0.25·complexity + 0.10·loyalty + 0.25·urgency)
//! ```
//!
//! # Usage
//!
//! ```
//! use cafe_dispatch::config::DispatchConfig;
//! use cafe_dispatch::dispatch::Dispatcher;
//! use cafe_dispatch::models::{NewOrder, MS_PER_MINUTE};
//! use cafe_dispatch::priority::{PriorityCalculator, ScoringContext};
//!
//! let mut dispatcher = Dispatcher::new(DispatchConfig::default())?;
//! let order = dispatcher.submit(NewOrder::new("Latte", 5).with_loyalty_tier(3), 0)?;
//!
//! let calculator = PriorityCalculator::new();
//! let context = ScoringContext::at_time(4 * MS_PER_MINUTE);
//! let breakdown = calculator.score(&order, &context);
//!
//! assert!((0.0..=100.0).contains(&breakdown.priority));
//! assert_eq!(breakdown.terms.len(), 4);
//! # Ok::<(), cafe_dispatch::DispatchError>(())
//! ```
//!
//! # Score Convention
//! Unlike classic dispatching rules, **higher score = served sooner**.
//! Every term returns a value clamped to `[0, 1]`.

mod calculator;
mod context;
pub mod terms;

pub use calculator::{
    compare_ranked, format_explanation, PriorityBreakdown, PriorityCalculator, TermContribution,
};
pub use context::ScoringContext;

use crate::models::Order;
use std::fmt::Debug;

/// Weight of the wait-time term.
pub const WEIGHT_WAIT: f64 = 0.40;
/// Weight of the complexity term.
pub const WEIGHT_COMPLEXITY: f64 = 0.25;
/// Weight of the loyalty term.
pub const WEIGHT_LOYALTY: f64 = 0.10;
/// Weight of the urgency term.
pub const WEIGHT_URGENCY: f64 = 0.25;

/// Display scale of priorities and sub-scores.
pub const PRIORITY_SCALE: f64 = 100.0;

/// Normalised sub-score in `[0, 1]`.
pub type TermScore = f64;

/// One weighted term of the priority formula.
pub trait ScoreTerm: Send + Sync + Debug {
    /// Short label used in explanations (e.g. "Wait").
    fn name(&self) -> &'static str;

    /// Fixed weight of this term in the formula.
    fn weight(&self) -> f64;

    /// Evaluates the term for an order. Must return a value in `[0, 1]`.
    fn evaluate(&self, order: &Order, context: &ScoringContext) -> TermScore;

    /// Term description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
