//! Manager alerts.
//!
//! Alerts are immutable once appended; the log only grows. Each alert
//! carries a sequence number so pollers can ask for the suffix they have
//! not seen yet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert severity/category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertTag {
    /// An order is approaching the service deadline.
    Warning,
    /// Skip starvation or workload imbalance.
    Fairness,
    /// An order timed out.
    Critical,
}

impl fmt::Display for AlertTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Warning => "WARNING",
            Self::Fairness => "FAIRNESS",
            Self::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

/// A single alert log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Position in the log (0-based).
    pub seq: u64,
    /// Category.
    pub tag: AlertTag,
    /// Human-readable message.
    pub message: String,
    /// When the alert was raised (ms).
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.tag, self.message)
    }
}

/// Append-only alert log.
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    entries: Vec<Alert>,
}

impl AlertLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an alert and returns it.
    pub fn push(&mut self, tag: AlertTag, message: impl Into<String>, timestamp_ms: i64) -> &Alert {
        let seq = self.entries.len() as u64;
        self.entries.push(Alert {
            seq,
            tag,
            message: message.into(),
            timestamp_ms,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Alerts with `seq >= since`.
    pub fn since(&self, since: u64) -> &[Alert] {
        let start = (since as usize).min(self.entries.len());
        &self.entries[start..]
    }

    /// All alerts, oldest first.
    pub fn all(&self) -> &[Alert] {
        &self.entries
    }

    /// Number of alerts carrying `tag`.
    pub fn count_tagged(&self, tag: AlertTag) -> usize {
        self.entries.iter().filter(|a| a.tag == tag).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
