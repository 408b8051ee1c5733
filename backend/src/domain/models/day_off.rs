//! Domain model for a day-off request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::DayOffStatus;
use uuid::Uuid;

/// A worker's request to be absent on one Gregorian date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOffRequest {
    pub id: String,
    pub worker_id: String,
    /// Gregorian storage key (YYYY-MM-DD)
    pub request_date: String,
    pub reason: String,
    pub status: DayOffStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    /// User id of the admin who decided the request
    pub reviewed_by: Option<String>,
}

impl DayOffRequest {
    /// New requests always start out pending
    pub fn new(worker_id: &str, request_date: &str, reason: &str) -> Self {
        Self {
            id: Self::generate_id(),
            worker_id: worker_id.to_string(),
            request_date: request_date.to_string(),
            reason: reason.to_string(),
            status: DayOffStatus::Pending,
            created_at: Utc::now(),
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    pub fn generate_id() -> String {
        format!("dayoff::{}", Uuid::new_v4())
    }

    pub fn is_pending(&self) -> bool {
        self.status == DayOffStatus::Pending
    }

    pub fn is_approved(&self) -> bool {
        self.status == DayOffStatus::Approved
    }
}
