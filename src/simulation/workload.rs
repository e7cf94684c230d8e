//! Synthetic workload generation.
//!
//! # Model
//!
//! - Arrivals: Poisson process, exponential inter-arrival times
//!   `-ln(1 - u) / λ` minutes, truncated at the end of the window
//! - Drink: sampled from a weighted menu (cumulative frequencies)
//! - Loyalty tier: uniform 1–5
//! - Regular customer: Bernoulli with the configured probability

use rand::Rng;

use crate::models::{NewOrder, MS_PER_MINUTE};
use crate::validation::{ValidationError, ValidationErrorKind, ValidationResult};

/// Highest accepted arrival rate (one order per second).
pub const MAX_ARRIVAL_RATE_PER_MIN: f64 = 60.0;

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuItem {
    pub drink_name: &'static str,
    pub prep_time_minutes: u32,
    /// Cumulative probability; the last entry is 1.0.
    pub cumulative_frequency: f64,
}

/// The bar's menu, most popular first.
pub static MENU: [MenuItem; 6] = [
    MenuItem {
        drink_name: "Cold Brew",
        prep_time_minutes: 2,
        cumulative_frequency: 0.25,
    },
    MenuItem {
        drink_name: "Espresso",
        prep_time_minutes: 2,
        cumulative_frequency: 0.45,
    },
    MenuItem {
        drink_name: "Americano",
        prep_time_minutes: 3,
        cumulative_frequency: 0.60,
    },
    MenuItem {
        drink_name: "Cappuccino",
        prep_time_minutes: 4,
        cumulative_frequency: 0.80,
    },
    MenuItem {
        drink_name: "Latte",
        prep_time_minutes: 5,
        cumulative_frequency: 0.92,
    },
    MenuItem {
        drink_name: "Mocha",
        prep_time_minutes: 6,
        cumulative_frequency: 1.00,
    },
];

/// A generated order and the time it reaches the counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    pub arrival_ms: i64,
    pub request: NewOrder,
}

/// Workload shape.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadProfile {
    /// Mean arrivals per minute (λ).
    pub arrival_rate_per_min: f64,
    /// Length of the arrival window (minutes).
    pub window_minutes: u32,
    /// Probability that a customer is a regular.
    pub regular_probability: f64,
}

impl Default for WorkloadProfile {
    fn default() -> Self {
        Self {
            arrival_rate_per_min: 1.4,
            window_minutes: 180,
            regular_probability: 0.4,
        }
    }
}

impl WorkloadProfile {
    /// Checks the rate and probability, reporting every problem found.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        let rate = self.arrival_rate_per_min;
        if !rate.is_finite() || !(0.0..=MAX_ARRIVAL_RATE_PER_MIN).contains(&rate) {
            errors.push(ValidationError {
                kind: ValidationErrorKind::InvalidThreshold,
                message: format!(
                    "arrivalRatePerMin must be within [0, {MAX_ARRIVAL_RATE_PER_MIN}], got {rate}"
                ),
            });
        }

        let probability = self.regular_probability;
        if !(0.0..=1.0).contains(&probability) {
            errors.push(ValidationError {
                kind: ValidationErrorKind::InvalidThreshold,
                message: format!("regularProbability must be within [0, 1], got {probability}"),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Generates arrivals in time order.
    ///
    /// A non-finite or non-positive rate yields no arrivals. Consecutive
    /// arrivals are at least 1 ms apart, so the window is always exhausted.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Arrival> {
        let window_ms = self.window_minutes as i64 * MS_PER_MINUTE;
        let mut arrivals = Vec::new();
        if !self.arrival_rate_per_min.is_finite() || self.arrival_rate_per_min <= 0.0 {
            return arrivals;
        }

        let mut now_ms: i64 = 0;
        loop {
            let u: f64 = rng.random();
            let gap_minutes = -(1.0 - u).ln() / self.arrival_rate_per_min;
            now_ms += ((gap_minutes * MS_PER_MINUTE as f64) as i64).max(1);
            if now_ms >= window_ms {
                break;
            }

            let item = pick_drink(rng.random());
            let request = NewOrder::new(item.drink_name, item.prep_time_minutes as i32)
                .with_loyalty_tier(rng.random_range(1..=5))
                .regular(rng.random_bool(self.regular_probability.clamp(0.0, 1.0)));
            arrivals.push(Arrival {
                arrival_ms: now_ms,
                request,
            });
        }
        arrivals
    }
}

/// Maps a uniform sample in `[0, 1)` onto the menu.
pub fn pick_drink(sample: f64) -> &'static MenuItem {
    MENU.iter()
        .find(|item| sample <= item.cumulative_frequency)
        .unwrap_or(&MENU[MENU.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ALLOWED_PREP_TIMES;
    use crate::validation::validate_order;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_menu_is_valid() {
        for item in &MENU {
            assert!(ALLOWED_PREP_TIMES.contains(&item.prep_time_minutes));
        }
        assert!((MENU[MENU.len() - 1].cumulative_frequency - 1.0).abs() < 1e-10);
        assert!(MENU
            .windows(2)
            .all(|w| w[0].cumulative_frequency < w[1].cumulative_frequency));
    }

    #[test]
    fn test_pick_drink_boundaries() {
        assert_eq!(pick_drink(0.0).drink_name, "Cold Brew");
        assert_eq!(pick_drink(0.25).drink_name, "Cold Brew");
        assert_eq!(pick_drink(0.2501).drink_name, "Espresso");
        assert_eq!(pick_drink(0.95).drink_name, "Mocha");
        assert_eq!(pick_drink(1.5).drink_name, "Mocha");
    }

    #[test]
    fn test_generate_is_sorted_and_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let arrivals = WorkloadProfile::default().generate(&mut rng);

        assert!(!arrivals.is_empty());
        assert!(arrivals.windows(2).all(|w| w[0].arrival_ms <= w[1].arrival_ms));
        assert!(arrivals.iter().all(|a| a.arrival_ms < 180 * MS_PER_MINUTE));
        for a in &arrivals {
            assert!(validate_order(&a.request).is_ok());
        }
    }

    #[test]
    fn test_generate_rate_is_plausible() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = WorkloadProfile::default().generate(&mut rng).len();
        // Expected 252; allow a wide band.
        assert!((150..=350).contains(&n), "got {n} arrivals");
    }

    #[test]
    fn test_same_seed_same_workload() {
        let profile = WorkloadProfile::default();
        let a = profile.generate(&mut StdRng::seed_from_u64(3));
        let b = profile.generate(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_rate_generates_nothing() {
        let profile = WorkloadProfile {
            arrival_rate_per_min: 0.0,
            ..WorkloadProfile::default()
        };
        assert!(profile.generate(&mut StdRng::seed_from_u64(1)).is_empty());
    }

    #[test]
    fn test_degenerate_rates_terminate() {
        for rate in [f64::NAN, f64::INFINITY, -1.0] {
            let profile = WorkloadProfile {
                arrival_rate_per_min: rate,
                ..WorkloadProfile::default()
            };
            assert!(profile.generate(&mut StdRng::seed_from_u64(1)).is_empty());
        }

        // Gaps that round down to zero still advance the clock.
        let flood = WorkloadProfile {
            arrival_rate_per_min: 1e9,
            window_minutes: 1,
            ..WorkloadProfile::default()
        };
        let arrivals = flood.generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(arrivals.len() as i64, MS_PER_MINUTE - 1);
        assert!(arrivals.windows(2).all(|w| w[0].arrival_ms < w[1].arrival_ms));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        assert!(WorkloadProfile::default().validate().is_ok());

        let bad = WorkloadProfile {
            arrival_rate_per_min: f64::NAN,
            window_minutes: 10,
            regular_probability: 1.5,
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.starts_with("arrivalRatePerMin"));
        assert!(errors[1].message.starts_with("regularProbability"));

        for rate in [f64::INFINITY, 1e9, -0.5] {
            let profile = WorkloadProfile {
                arrival_rate_per_min: rate,
                ..WorkloadProfile::default()
            };
            assert_eq!(profile.validate().unwrap_err().len(), 1);
        }
    }
}
