//! Engine and server configuration.
//!
//! [`DispatchConfig`] holds the engine tunables (all with defaults matching
//! the bar's service policy). [`ServerConfig`] is loaded from environment
//! variables for the HTTP binary.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Service deadline: orders older than this time out.
pub const DEFAULT_SERVICE_DEADLINE_MINUTES: f64 = 8.0;
/// Wait at which urgency starts rising.
pub const DEFAULT_URGENCY_ONSET_MINUTES: f64 = 6.0;
/// Largest prep-time bucket; complexity is normalised against it.
pub const DEFAULT_COMPLEXITY_CEILING_MINUTES: f64 = 8.0;
/// Loyalty sub-score bonus for regular customers.
pub const DEFAULT_REGULAR_CUSTOMER_BONUS: f64 = 0.5;
/// Urgency added per skipped tick.
pub const DEFAULT_SKIP_URGENCY_BOOST: f64 = 0.01;
/// Workload ratio above which a barista is reported as overloaded.
pub const DEFAULT_FAIRNESS_RATIO_THRESHOLD: f64 = 1.2;
/// Skip count above which a starvation alert is raised.
pub const DEFAULT_SKIP_ALERT_THRESHOLD: u32 = 3;
/// Interval between unsolicited scheduling ticks.
pub const DEFAULT_TICK_INTERVAL_MS: i64 = 2_000;

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispatchConfig {
    /// Barista pool, in id order (ids start at 1).
    pub barista_names: Vec<String>,
    /// Service deadline (minutes since arrival).
    pub service_deadline_minutes: f64,
    /// Urgency onset (minutes since arrival).
    pub urgency_onset_minutes: f64,
    /// Complexity normalisation ceiling (minutes).
    pub complexity_ceiling_minutes: f64,
    /// Loyalty bonus for regulars (sub-score units).
    pub regular_customer_bonus: f64,
    /// Urgency boost per skip (sub-score units).
    pub skip_urgency_boost: f64,
    /// Overload threshold on the workload ratio.
    pub fairness_ratio_threshold: f64,
    /// Skip count above which a FAIRNESS alert is raised once.
    pub skip_alert_threshold: u32,
    /// Interval tick period (ms).
    pub tick_interval_ms: i64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            barista_names: vec!["Alice".into(), "Bob".into(), "Charlie".into()],
            service_deadline_minutes: DEFAULT_SERVICE_DEADLINE_MINUTES,
            urgency_onset_minutes: DEFAULT_URGENCY_ONSET_MINUTES,
            complexity_ceiling_minutes: DEFAULT_COMPLEXITY_CEILING_MINUTES,
            regular_customer_bonus: DEFAULT_REGULAR_CUSTOMER_BONUS,
            skip_urgency_boost: DEFAULT_SKIP_URGENCY_BOOST,
            fairness_ratio_threshold: DEFAULT_FAIRNESS_RATIO_THRESHOLD,
            skip_alert_threshold: DEFAULT_SKIP_ALERT_THRESHOLD,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl DispatchConfig {
    /// Replaces the barista pool.
    pub fn with_baristas<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.barista_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the skip urgency boost.
    pub fn with_skip_urgency_boost(mut self, boost: f64) -> Self {
        self.skip_urgency_boost = boost;
        self
    }

    /// Sets the interval tick period.
    pub fn with_tick_interval_ms(mut self, ms: i64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Service deadline in ms.
    pub fn service_deadline_ms(&self) -> i64 {
        (self.service_deadline_minutes * 60_000.0).round() as i64
    }

    /// Urgency onset in ms.
    pub fn urgency_onset_ms(&self) -> i64 {
        (self.urgency_onset_minutes * 60_000.0).round() as i64
    }
}

/// HTTP server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Timeout monitor period in ms (default: `1000`).
    pub monitor_interval_ms: u64,
    /// Complete in-progress orders once their prep time elapses (default: `true`).
    pub auto_complete: bool,
    /// Seed used by `/simulation/run` when none is given (default: `42`).
    pub simulation_seed: u64,
    /// Upper bound on `testCases` per simulation request (default: `50`).
    pub max_simulation_cases: usize,
    /// Engine tunables.
    pub dispatch: DispatchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            cors_origins: vec!["http://localhost:3000".into()],
            request_timeout_secs: 30,
            monitor_interval_ms: 1_000,
            auto_complete: true,
            simulation_seed: 42,
            max_simulation_cases: 50,
            dispatch: DispatchConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `8080`                   |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `MONITOR_INTERVAL_MS`  | `1000`                   |
    /// | `AUTO_COMPLETE`        | `true`                   |
    /// | `SIMULATION_SEED`      | `42`                     |
    /// | `MAX_SIMULATION_CASES` | `50`                     |
    /// | `BARISTAS`             | `Alice,Bob,Charlie`      |
    ///
    /// Unparseable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.cors_origins);

        let mut dispatch = defaults.dispatch;
        if let Ok(names) = std::env::var("BARISTAS") {
            let names = split_list(&names);
            if names.is_empty() {
                tracing::warn!("BARISTAS is empty, keeping the default pool");
            } else {
                dispatch.barista_names = names;
            }
        }

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            monitor_interval_ms: env_or("MONITOR_INTERVAL_MS", defaults.monitor_interval_ms),
            auto_complete: env_or("AUTO_COMPLETE", defaults.auto_complete),
            simulation_seed: env_or("SIMULATION_SEED", defaults.simulation_seed),
            max_simulation_cases: env_or("MAX_SIMULATION_CASES", defaults.max_simulation_cases),
            dispatch,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    fallback = %default,
                    "Invalid config value, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}
