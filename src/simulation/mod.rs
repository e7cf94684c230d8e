//! Stress simulation harness.
//!
//! Each case feeds a seeded synthetic workload through a fresh
//! [`Dispatcher`] and fast-forwards a simulated clock from event to event:
//!
//! 1. Complete orders whose prep time elapsed
//! 2. Submit arrivals due at the current instant
//! 3. Sweep timeouts
//! 4. Run the interval tick if due
//!
//! The next instant is the earliest of: next arrival, next prep
//! completion, next service deadline of an active order, next interval tick
//! (only while orders are queued).
//!
//! Cases share nothing. Case `i` (1-based) is seeded with `seed + i`, so
//! the same seed always reproduces the same sequence of results.

mod workload;

pub use workload::{pick_drink, Arrival, MenuItem, WorkloadProfile, MENU};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::DispatchConfig;
use crate::dispatch::Dispatcher;
use crate::error::DispatchError;
use crate::models::OrderStatus;
use crate::stats::QueueStats;
use crate::validation::validate_config;

/// Harness configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Base seed; case `i` uses `seed + i`.
    pub seed: u64,
    /// Synthetic workload shape.
    pub workload: WorkloadProfile,
    /// Tick budget per case. A case that exhausts it is reported undrained.
    pub max_ticks: u64,
    /// Engine tunables for every case.
    pub dispatch: DispatchConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            workload: WorkloadProfile::default(),
            max_ticks: 50_000,
            dispatch: DispatchConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the workload shape.
    pub fn with_workload(mut self, workload: WorkloadProfile) -> Self {
        self.workload = workload;
        self
    }

    /// Sets the per-case tick budget.
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Sets the engine tunables.
    pub fn with_dispatch(mut self, dispatch: DispatchConfig) -> Self {
        self.dispatch = dispatch;
        self
    }
}

/// Results of one simulated case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationCase {
    /// 1-based case index.
    pub test_case: u32,
    pub total_orders: usize,
    /// Mean arrival-to-completion minutes over completed orders, one decimal.
    pub avg_wait_time: f64,
    /// Completed orders per barista, in id order.
    pub barista_orders: Vec<u32>,
    pub timeouts: u64,
    pub completed: u64,
    /// False if the tick budget ran out before the batch drained.
    pub drained: bool,
    pub ticks: u64,
}

/// Runs simulation cases.
///
/// # Example
/// ```
/// use cafe_dispatch::simulation::{SimulationConfig, Simulator, WorkloadProfile};
///
/// let config = SimulationConfig::default().with_workload(WorkloadProfile {
///     window_minutes: 20,
///     ..WorkloadProfile::default()
/// });
/// let cases = Simulator::new(config).unwrap().run(2).unwrap();
/// assert_eq!(cases.len(), 2);
/// assert_eq!(cases[1].test_case, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator after checking the configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, DispatchError> {
        config.workload.validate()?;
        validate_config(&config.dispatch)?;
        Ok(Self { config })
    }

    /// Runs `test_cases` independent cases.
    pub fn run(&self, test_cases: u32) -> Result<Vec<SimulationCase>, DispatchError> {
        (1..=test_cases).map(|i| self.run_case(i)).collect()
    }

    /// Runs one case (1-based index).
    pub fn run_case(&self, test_case: u32) -> Result<SimulationCase, DispatchError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(test_case as u64));
        let arrivals = self.config.workload.generate(&mut rng);
        let total_orders = arrivals.len();

        let mut dispatcher = Dispatcher::new(self.config.dispatch.clone())?;
        let mut pending = arrivals.into_iter().peekable();
        let mut now_ms: i64 = 0;

        loop {
            dispatcher.complete_due(now_ms);
            while let Some(arrival) = pending.next_if(|a| a.arrival_ms <= now_ms) {
                dispatcher.submit(arrival.request, now_ms)?;
            }
            dispatcher.sweep_timeouts(now_ms);
            dispatcher.tick_if_due(now_ms);

            if dispatcher.tick_count() >= self.config.max_ticks {
                break;
            }
            let next_arrival = pending.peek().map(|a| a.arrival_ms);
            match next_event(&dispatcher, next_arrival, now_ms) {
                Some(next) => now_ms = next,
                None => break,
            }
        }

        let drained = pending.peek().is_none() && dispatcher.is_idle();
        if !drained {
            warn!(
                test_case,
                ticks = dispatcher.tick_count(),
                "Simulation case exhausted its tick budget before draining"
            );
        }

        let stats = QueueStats::calculate(&dispatcher, None);
        let case = SimulationCase {
            test_case,
            total_orders,
            avg_wait_time: (stats.average_wait_minutes * 10.0).round() / 10.0,
            barista_orders: dispatcher
                .baristas()
                .iter()
                .map(|b| b.orders_completed)
                .collect(),
            timeouts: stats.timeout_count,
            completed: stats.completed_count,
            drained,
            ticks: dispatcher.tick_count(),
        };
        info!(
            test_case,
            total_orders,
            completed = case.completed,
            timeouts = case.timeouts,
            "Simulation case finished"
        );
        Ok(case)
    }
}

/// Earliest instant after `now_ms` at which anything can change.
fn next_event(dispatcher: &Dispatcher, next_arrival: Option<i64>, now_ms: i64) -> Option<i64> {
    let deadline_ms = dispatcher.config().service_deadline_ms();
    let mut candidates: Vec<i64> = next_arrival.into_iter().collect();

    for order in dispatcher.orders() {
        match order.status {
            OrderStatus::InProgress => {
                candidates.extend(order.ready_at_ms());
                candidates.push(order.arrival_time_ms + deadline_ms);
            }
            OrderStatus::Queued => candidates.push(order.arrival_time_ms + deadline_ms),
            OrderStatus::Completed | OrderStatus::TimedOut => {}
        }
    }

    if dispatcher.queued_len() > 0 {
        let last = dispatcher.last_tick_ms().unwrap_or(now_ms);
        candidates.push(last + dispatcher.config().tick_interval_ms);
    }

    candidates.into_iter().filter(|&t| t > now_ms).min()
}
