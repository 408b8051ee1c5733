//! Domain models for workers, time logs and day-off requests.

pub mod day_off;
pub mod time_log;
pub mod worker;

use thiserror::Error;

/// A stored record that cannot be trusted for aggregation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Malformed record {record_id}: {reason}")]
pub struct MalformedRecord {
    pub record_id: String,
    pub reason: String,
}

impl MalformedRecord {
    pub fn new(record_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            reason: reason.into(),
        }
    }
}
