//! Built-in score terms.
//!
//! # Terms
//!
//! - **Wait**: time since arrival against the service deadline
//! - **Complexity**: prep time against the largest menu bucket
//! - **Loyalty**: tier plus a regular-customer bonus
//! - **Urgency**: step function of wait plus anti-starvation skip boost
//!
//! All terms clamp to `[0, 1]`.

use super::{
    ScoreTerm, ScoringContext, TermScore, WEIGHT_COMPLEXITY, WEIGHT_LOYALTY, WEIGHT_URGENCY,
    WEIGHT_WAIT,
};
use crate::models::Order;

/// Highest loyalty tier.
const MAX_LOYALTY_TIER: f64 = 5.0;

/// Wait time since arrival.
///
/// `min(wait / deadline, 1)`.
#[derive(Debug, Clone, Copy)]
pub struct WaitTime;

impl ScoreTerm for WaitTime {
    fn name(&self) -> &'static str {
        "Wait"
    }

    fn weight(&self) -> f64 {
        WEIGHT_WAIT
    }

    fn evaluate(&self, order: &Order, context: &ScoringContext) -> TermScore {
        if context.service_deadline_minutes <= 0.0 {
            return 1.0;
        }
        (order.wait_minutes(context.now_ms) / context.service_deadline_minutes).clamp(0.0, 1.0)
    }

    fn description(&self) -> &'static str {
        "Time waited, normalised against the service deadline"
    }
}

/// Drink complexity.
///
/// Longer prep raises priority so complex drinks are not deferred forever.
#[derive(Debug, Clone, Copy)]
pub struct Complexity;

impl ScoreTerm for Complexity {
    fn name(&self) -> &'static str {
        "Complexity"
    }

    fn weight(&self) -> f64 {
        WEIGHT_COMPLEXITY
    }

    fn evaluate(&self, order: &Order, context: &ScoringContext) -> TermScore {
        if context.complexity_ceiling_minutes <= 0.0 {
            return 0.0;
        }
        (order.prep_time_minutes as f64 / context.complexity_ceiling_minutes).clamp(0.0, 1.0)
    }

    fn description(&self) -> &'static str {
        "Prep time, normalised against the largest menu bucket"
    }
}

/// Customer loyalty.
///
/// `tier / 5`, plus the regular-customer bonus.
#[derive(Debug, Clone, Copy)]
pub struct Loyalty;

impl ScoreTerm for Loyalty {
    fn name(&self) -> &'static str {
        "Loyalty"
    }

    fn weight(&self) -> f64 {
        WEIGHT_LOYALTY
    }

    fn evaluate(&self, order: &Order, context: &ScoringContext) -> TermScore {
        let base = order.loyalty_tier as f64 / MAX_LOYALTY_TIER;
        let bonus = if order.is_regular_customer {
            context.regular_customer_bonus
        } else {
            0.0
        };
        (base + bonus).clamp(0.0, 1.0)
    }

    fn description(&self) -> &'static str {
        "Loyalty tier with a bonus for regulars"
    }
}

/// Deadline urgency with skip boost.
///
/// - wait < onset: 0
/// - onset ≤ wait < deadline: linear ramp 0 → 1
/// - wait ≥ deadline: 1
///
/// Each recorded skip adds `skip_urgency_boost`; the total is capped at 1.
#[derive(Debug, Clone, Copy)]
pub struct Urgency;

impl Urgency {
    /// Urgency from wait alone, before the skip boost.
    pub fn base(wait_minutes: f64, context: &ScoringContext) -> f64 {
        let onset = context.urgency_onset_minutes;
        let deadline = context.service_deadline_minutes;
        if wait_minutes < onset {
            0.0
        } else if wait_minutes >= deadline || deadline <= onset {
            1.0
        } else {
            (wait_minutes - onset) / (deadline - onset)
        }
    }
}

impl ScoreTerm for Urgency {
    fn name(&self) -> &'static str {
        "Urgency"
    }

    fn weight(&self) -> f64 {
        WEIGHT_URGENCY
    }

    fn evaluate(&self, order: &Order, context: &ScoringContext) -> TermScore {
        let base = Self::base(order.wait_minutes(context.now_ms), context);
        let boost = order.skip_count as f64 * context.skip_urgency_boost;
        (base + boost).clamp(0.0, 1.0)
    }

    fn description(&self) -> &'static str {
        "Deadline pressure plus anti-starvation skip boost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewOrder, MS_PER_MINUTE};

    fn make_order(prep: i32, tier: i32, regular: bool, arrival_ms: i64) -> Order {
        Order::from_request(
            1,
            NewOrder::new("Drink", prep)
                .with_loyalty_tier(tier)
                .regular(regular),
            arrival_ms,
        )
    }

    fn minutes(m: f64) -> i64 {
        (m * MS_PER_MINUTE as f64) as i64
    }

    #[test]
    fn test_wait_time() {
        let order = make_order(4, 1, false, 0);
        assert!((WaitTime.evaluate(&order, &ScoringContext::at_time(0)) - 0.0).abs() < 1e-10);
        let half = ScoringContext::at_time(minutes(4.0));
        assert!((WaitTime.evaluate(&order, &half) - 0.5).abs() < 1e-10);
        let late = ScoringContext::at_time(minutes(20.0));
        assert!((WaitTime.evaluate(&order, &late) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_complexity() {
        let ctx = ScoringContext::at_time(0);
        assert!((Complexity.evaluate(&make_order(2, 1, false, 0), &ctx) - 0.25).abs() < 1e-10);
        assert!((Complexity.evaluate(&make_order(8, 1, false, 0), &ctx) - 1.0).abs() < 1e-10);
        assert!(
            Complexity.evaluate(&make_order(6, 1, false, 0), &ctx)
                > Complexity.evaluate(&make_order(3, 1, false, 0), &ctx)
        );
    }

    #[test]
    fn test_loyalty() {
        let ctx = ScoringContext::at_time(0);
        assert!((Loyalty.evaluate(&make_order(4, 1, false, 0), &ctx) - 0.2).abs() < 1e-10);
        assert!((Loyalty.evaluate(&make_order(4, 1, true, 0), &ctx) - 0.7).abs() < 1e-10);
        // 5/5 + 0.5 is capped.
        assert!((Loyalty.evaluate(&make_order(4, 5, true, 0), &ctx) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_urgency_steps() {
        let order = make_order(4, 1, false, 0);
        let at = |m: f64| Urgency.evaluate(&order, &ScoringContext::at_time(minutes(m)));
        assert!((at(0.0) - 0.0).abs() < 1e-10);
        assert!((at(5.99) - 0.0).abs() < 1e-10);
        assert!((at(6.0) - 0.0).abs() < 1e-10);
        assert!((at(7.0) - 0.5).abs() < 1e-10);
        assert!((at(8.0) - 1.0).abs() < 1e-10);
        assert!((at(30.0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_urgency_skip_boost_capped() {
        let mut order = make_order(4, 1, false, 0);
        let ctx = ScoringContext::at_time(minutes(7.0)).with_skip_urgency_boost(0.1);
        order.skip_count = 2;
        assert!((Urgency.evaluate(&order, &ctx) - 0.7).abs() < 1e-10);
        order.skip_count = 50;
        assert!((Urgency.evaluate(&order, &ctx) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum = WaitTime.weight() + Complexity.weight() + Loyalty.weight() + Urgency.weight();
        assert!((sum - 1.0).abs() < 1e-10);
    }
}
