//! Domain model for a roster entry.

use serde::{Deserialize, Serialize};

/// An hourly worker as known to the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub full_name: String,
    /// Inactive workers are kept for history but left out of monthly summaries
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Worker {
    pub fn new(id: &str, full_name: &str) -> Self {
        Self {
            id: id.to_string(),
            full_name: full_name.to_string(),
            active: true,
        }
    }
}
