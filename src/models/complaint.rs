//! Customer complaint record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored complaint about a barista.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: u64,
    pub barista_name: String,
    pub username: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Complaint submission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    pub barista_name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub message: String,
}
