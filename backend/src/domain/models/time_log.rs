//! Domain model for a daily time log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MalformedRecord;
use crate::domain::jalali;

/// Hours a worker logged on one Gregorian date.
/// There is at most one entry per `(worker_id, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLogEntry {
    pub id: String,
    pub worker_id: String,
    /// Gregorian storage key (YYYY-MM-DD)
    pub date: String,
    pub hours_worked: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeLogEntry {
    pub fn new(
        worker_id: &str,
        date: &str,
        hours_worked: f64,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(),
            worker_id: worker_id.to_string(),
            date: date.to_string(),
            hours_worked,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn generate_id() -> String {
        format!("log::{}", Uuid::new_v4())
    }

    /// Check the fields aggregation depends on
    pub fn validate(&self) -> Result<(), MalformedRecord> {
        if !self.hours_worked.is_finite() {
            return Err(MalformedRecord::new(
                &self.id,
                format!("hours_worked is not a number: {}", self.hours_worked),
            ));
        }
        if self.hours_worked < 0.0 {
            return Err(MalformedRecord::new(
                &self.id,
                format!("hours_worked is negative: {}", self.hours_worked),
            ));
        }
        jalali::parse_storage_date(&self.date)
            .map_err(|e| MalformedRecord::new(&self.id, e.to_string()))?;
        Ok(())
    }
}
