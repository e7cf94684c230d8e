//! Weighted priority calculator.
//!
//! Combines the four fixed score terms into a 0–100 priority and renders
//! the explanation shown to customers.

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;

use super::terms::{Complexity, Loyalty, Urgency, WaitTime};
use super::{ScoreTerm, ScoringContext, PRIORITY_SCALE};
use crate::models::Order;

/// One term's share of a priority.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermContribution {
    /// Term label.
    pub name: &'static str,
    /// Normalised sub-score in `[0, 1]`.
    pub score: f64,
    /// Fixed term weight.
    pub weight: f64,
}

impl TermContribution {
    /// Weighted contribution on the 0–100 scale.
    pub fn weighted(&self) -> f64 {
        self.score * self.weight * PRIORITY_SCALE
    }
}

/// Result of scoring one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityBreakdown {
    /// Final priority on the 0–100 scale.
    pub priority: f64,
    /// Per-term sub-scores, in formula order.
    pub terms: Vec<TermContribution>,
    /// Human-readable breakdown.
    pub explanation: String,
}

/// Scores orders with the fixed four-term formula.
///
/// # Example
/// ```
/// use cafe_dispatch::priority::PriorityCalculator;
///
/// let calculator = PriorityCalculator::new();
/// assert_eq!(calculator.term_names(), vec!["Wait", "Complexity", "Loyalty", "Urgency"]);
/// ```
#[derive(Clone)]
pub struct PriorityCalculator {
    terms: Vec<Arc<dyn ScoreTerm>>,
}

impl PriorityCalculator {
    /// Creates the standard calculator (wait, complexity, loyalty, urgency).
    pub fn new() -> Self {
        Self {
            terms: vec![
                Arc::new(WaitTime),
                Arc::new(Complexity),
                Arc::new(Loyalty),
                Arc::new(Urgency),
            ],
        }
    }

    /// Term labels in formula order.
    pub fn term_names(&self) -> Vec<&'static str> {
        self.terms.iter().map(|t| t.name()).collect()
    }

    /// Scores one order. Pure: same order and context give the same result.
    pub fn score(&self, order: &Order, context: &ScoringContext) -> PriorityBreakdown {
        let terms: Vec<TermContribution> = self
            .terms
            .iter()
            .map(|t| TermContribution {
                name: t.name(),
                score: t.evaluate(order, context).clamp(0.0, 1.0),
                weight: t.weight(),
            })
            .collect();

        let priority = terms.iter().map(TermContribution::weighted).sum::<f64>();
        let priority = priority.clamp(0.0, PRIORITY_SCALE);
        let explanation = format_explanation(&terms, priority, order.skip_count);

        PriorityBreakdown {
            priority,
            terms,
            explanation,
        }
    }

    /// Sorts orders into dispatch order (see [`compare_ranked`]).
    ///
    /// Uses each order's stored `priority`; callers rescore first.
    pub fn rank(&self, orders: &mut [&Order]) {
        orders.sort_by(|a, b| compare_ranked(a, b));
    }
}

impl Default for PriorityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PriorityCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityCalculator")
            .field(
                "terms",
                &self
                    .terms
                    .iter()
                    .map(|t| format!("{}(w={})", t.name(), t.weight()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Dispatch order: priority descending, then earlier arrival, then lower id.
pub fn compare_ranked(a: &Order, b: &Order) -> Ordering {
    b.priority
        .partial_cmp(&a.priority)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.arrival_time_ms.cmp(&b.arrival_time_ms))
        .then_with(|| a.id.cmp(&b.id))
}

/// Renders a priority breakdown.
///
/// ```text
/// Wait: 50.0 (×0.40=20.0) + Complexity: 50.0 (×0.25=12.5) + Loyalty: 20.0 (×0.10=2.0) + Urgency: 0.0 (×0.25=0.0) = 34.5
/// ```
///
/// A `[skips: n]` suffix is appended when the order has been skipped.
pub fn format_explanation(terms: &[TermContribution], priority: f64, skip_count: u32) -> String {
    let mut out = String::new();
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            out.push_str(" + ");
        }
        let _ = write!(
            out,
            "{}: {:.1} (×{:.2}={:.1})",
            term.name,
            term.score * PRIORITY_SCALE,
            term.weight,
            term.weighted()
        );
    }
    let _ = write!(out, " = {priority:.1}");
    if skip_count > 0 {
        let _ = write!(out, " [skips: {skip_count}]");
    }
    out
}
