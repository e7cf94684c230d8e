//! Scoring context for priority evaluation.

use crate::config::{
    DispatchConfig, DEFAULT_COMPLEXITY_CEILING_MINUTES, DEFAULT_REGULAR_CUSTOMER_BONUS,
    DEFAULT_SERVICE_DEADLINE_MINUTES, DEFAULT_SKIP_URGENCY_BOOST, DEFAULT_URGENCY_ONSET_MINUTES,
};

/// Clock reading and policy knobs passed to score terms.
///
/// All times are epoch milliseconds; all thresholds are minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringContext {
    /// Current time (ms).
    pub now_ms: i64,
    /// Wait normalisation and urgency saturation point.
    pub service_deadline_minutes: f64,
    /// Wait at which urgency starts rising.
    pub urgency_onset_minutes: f64,
    /// Complexity normalisation ceiling.
    pub complexity_ceiling_minutes: f64,
    /// Loyalty bonus for regulars.
    pub regular_customer_bonus: f64,
    /// Urgency boost per skip.
    pub skip_urgency_boost: f64,
}

impl ScoringContext {
    /// Creates a context at the given time with the default policy.
    pub fn at_time(now_ms: i64) -> Self {
        Self {
            now_ms,
            service_deadline_minutes: DEFAULT_SERVICE_DEADLINE_MINUTES,
            urgency_onset_minutes: DEFAULT_URGENCY_ONSET_MINUTES,
            complexity_ceiling_minutes: DEFAULT_COMPLEXITY_CEILING_MINUTES,
            regular_customer_bonus: DEFAULT_REGULAR_CUSTOMER_BONUS,
            skip_urgency_boost: DEFAULT_SKIP_URGENCY_BOOST,
        }
    }

    /// Creates a context at the given time using the engine's tunables.
    pub fn from_config(config: &DispatchConfig, now_ms: i64) -> Self {
        Self {
            now_ms,
            service_deadline_minutes: config.service_deadline_minutes,
            urgency_onset_minutes: config.urgency_onset_minutes,
            complexity_ceiling_minutes: config.complexity_ceiling_minutes,
            regular_customer_bonus: config.regular_customer_bonus,
            skip_urgency_boost: config.skip_urgency_boost,
        }
    }

    /// Sets the urgency boost per skip.
    pub fn with_skip_urgency_boost(mut self, boost: f64) -> Self {
        self.skip_urgency_boost = boost;
        self
    }

    /// Sets the regular-customer loyalty bonus.
    pub fn with_regular_customer_bonus(mut self, bonus: f64) -> Self {
        self.regular_customer_bonus = bonus;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_matches_default() {
        let ctx = ScoringContext::from_config(&DispatchConfig::default(), 5);
        assert_eq!(ctx, ScoringContext::at_time(5));
    }
}
