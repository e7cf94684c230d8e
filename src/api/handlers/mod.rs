pub mod alerts;
pub mod baristas;
pub mod complaints;
pub mod orders;
pub mod scheduler;
pub mod simulation;
pub mod stats;

use serde::Deserialize;

/// `?username=` filter shared by the queue and stats endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub username: Option<String>,
}

impl UserFilter {
    /// The username, with blank values treated as absent.
    pub fn username(&self) -> Option<&str> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}
