//! Append-only complaint log.
//!
//! Customer feedback keyed by barista name. It has no scheduling semantics
//! and is kept in memory next to the engine.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::dispatch::ExpiredOrder;
use crate::error::DispatchError;
use crate::models::{Complaint, NewComplaint};
use crate::validation::validate_complaint;

/// Username recorded when a complaint is filed without one.
pub const ANONYMOUS: &str = "anonymous";

/// Barista named on a timeout complaint when nobody held the order.
pub const UNASSIGNED_BARISTA: &str = "System (Auto-Raised)";

#[derive(Debug, Clone, Default)]
pub struct ComplaintLog {
    entries: Vec<Complaint>,
}

impl ComplaintLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a complaint.
    pub fn submit(
        &mut self,
        request: NewComplaint,
        now: DateTime<Utc>,
    ) -> Result<Complaint, DispatchError> {
        validate_complaint(&request)?;

        let username = request
            .username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| ANONYMOUS.to_string());
        let complaint = self.record(
            request.barista_name.trim().to_string(),
            username,
            request.message.trim().to_string(),
            now,
        );
        info!(id = complaint.id, barista = %complaint.barista_name, "Complaint filed");
        Ok(complaint)
    }

    /// Files the automatic complaint for an order that timed out.
    ///
    /// Blames the barista that held the order, or [`UNASSIGNED_BARISTA`]
    /// if it never left the queue.
    pub fn file_timeout(&mut self, expired: &ExpiredOrder, now: DateTime<Utc>) -> Complaint {
        let barista_name = expired
            .barista_name
            .clone()
            .unwrap_or_else(|| UNASSIGNED_BARISTA.to_string());
        let username = expired
            .username
            .clone()
            .unwrap_or_else(|| ANONYMOUS.to_string());
        let message = format!(
            "Auto-raised on timeout: Order #{} ({}) waited {:.1} minutes",
            expired.order_id, expired.drink_name, expired.wait_minutes
        );
        let complaint = self.record(barista_name, username, message, now);
        info!(
            id = complaint.id,
            order_id = expired.order_id,
            barista = %complaint.barista_name,
            "Timeout complaint filed"
        );
        complaint
    }

    fn record(
        &mut self,
        barista_name: String,
        username: String,
        message: String,
        now: DateTime<Utc>,
    ) -> Complaint {
        let complaint = Complaint {
            id: self.entries.len() as u64 + 1,
            barista_name,
            username,
            message,
            created_at: now,
        };
        self.entries.push(complaint.clone());
        complaint
    }

    /// All complaints, newest first.
    pub fn all_newest_first(&self) -> Vec<Complaint> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Complaints about one barista (case-insensitive), newest first.
    pub fn by_barista(&self, name: &str) -> Vec<Complaint> {
        self.entries
            .iter()
            .rev()
            .filter(|c| c.barista_name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
