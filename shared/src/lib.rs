use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Review state of a day-off request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOffStatus {
    /// Created by a worker, waiting for an admin decision
    Pending,
    /// Counted toward the worker's monthly summary
    Approved,
    Rejected,
}

impl DayOffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOffStatus::Pending => "pending",
            DayOffStatus::Approved => "approved",
            DayOffStatus::Rejected => "rejected",
        }
    }

    /// Persian label shown in the dashboard
    pub fn persian_label(&self) -> &'static str {
        match self {
            DayOffStatus::Pending => "در انتظار",
            DayOffStatus::Approved => "تایید شده",
            DayOffStatus::Rejected => "رد شده",
        }
    }
}

impl fmt::Display for DayOffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid day-off status: {0}")]
pub struct DayOffStatusParseError(pub String);

impl FromStr for DayOffStatus {
    type Err = DayOffStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(DayOffStatus::Pending),
            "approved" => Ok(DayOffStatus::Approved),
            "rejected" => Ok(DayOffStatus::Rejected),
            other => Err(DayOffStatusParseError(other.to_string())),
        }
    }
}

/// Admin decision on a pending day-off request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOffDecision {
    Approve,
    Reject,
}

impl DayOffDecision {
    pub fn resulting_status(&self) -> DayOffStatus {
        match self {
            DayOffDecision::Approve => DayOffStatus::Approved,
            DayOffDecision::Reject => DayOffStatus::Rejected,
        }
    }
}

/// Per-worker totals for one Jalali month. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub worker_id: String,
    pub worker_name: String,
    pub total_hours: f64,
    /// Distinct Gregorian dates with a time log
    pub days_worked: u32,
    pub approved_days_off: u32,
}

impl WorkerSummary {
    /// Summary for a worker with no activity in the month
    pub fn empty(worker_id: &str, worker_name: &str) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            worker_name: worker_name.to_string(),
            total_hours: 0.0,
            days_worked: 0,
            approved_days_off: 0,
        }
    }
}

/// Time log as shown to dashboard users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLogView {
    pub id: String,
    pub worker_id: String,
    /// Gregorian storage key (YYYY-MM-DD)
    pub date: String,
    /// Jalali display form (1403/01/15)
    pub jalali_date: String,
    pub hours_worked: f64,
    pub description: Option<String>,
}

/// Day-off request as shown in the admin review list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOffRequestView {
    pub id: String,
    pub worker_id: String,
    /// Gregorian storage key (YYYY-MM-DD)
    pub request_date: String,
    /// Jalali display form (1403/01/15)
    pub jalali_date: String,
    pub reason: String,
    pub status: DayOffStatus,
    /// RFC 3339 timestamp of the admin decision
    pub reviewed_at: Option<String>,
}

/// Monthly payroll report for admins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    /// First day of the month as a storage key
    pub start_date: String,
    /// Last day of the month as a storage key
    pub end_date: String,
    pub summaries: Vec<WorkerSummary>,
    /// Every request in the month regardless of status
    pub day_off_requests: Vec<DayOffRequestView>,
}

/// Request to log hours. `date` is user-entered Jalali text such as "1403/01/15".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogHoursRequest {
    pub worker_id: Option<String>,
    pub date: String,
    pub hours_worked: f64,
    pub description: Option<String>,
}

/// Whether a write created a new record or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogHoursResponse {
    pub entry: TimeLogView,
    pub outcome: UpsertOutcome,
}

/// Request for a day off. `date` is user-entered Jalali text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOffRequestInput {
    pub worker_id: Option<String>,
    pub date: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDayOffRequest {
    pub request_id: String,
    pub decision: DayOffDecision,
}

/// Type of calendar cell for explicit rendering logic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CalendarDayType {
    /// Empty padding cell before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// A Jalali month laid out as a Saturday-first calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub days: Vec<CalendarDay>,
    /// 0 = Saturday, 6 = Friday
    pub first_day_of_week: u32,
}

/// A single cell in the calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    /// Jalali day of month, 0 for padding cells
    pub day: u32,
    /// Gregorian storage key, empty for padding cells
    pub gregorian_date: String,
    pub weekday_name: String,
    /// Fridays are the weekly off-day and get shaded
    pub is_off_day: bool,
    pub hours_logged: Option<f64>,
    pub day_off_status: Option<DayOffStatus>,
    pub day_type: CalendarDayType,
}

impl CalendarDay {
    pub fn padding() -> Self {
        Self {
            day: 0,
            gregorian_date: String::new(),
            weekday_name: String::new(),
            is_off_day: false,
            hours_logged: None,
            day_off_status: None,
            day_type: CalendarDayType::PaddingBefore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_off_status_parse() {
        assert_eq!("pending".parse::<DayOffStatus>().unwrap(), DayOffStatus::Pending);
        assert_eq!(" Approved ".parse::<DayOffStatus>().unwrap(), DayOffStatus::Approved);
        assert_eq!("REJECTED".parse::<DayOffStatus>().unwrap(), DayOffStatus::Rejected);
        assert!("cancelled".parse::<DayOffStatus>().is_err());
    }

    #[test]
    fn test_day_off_status_parse_error_message() {
        let err = "Cancelled".parse::<DayOffStatus>().unwrap_err();
        assert_eq!(err, DayOffStatusParseError("cancelled".to_string()));
        assert_eq!(err.to_string(), "Invalid day-off status: cancelled");
    }

    #[test]
    fn test_day_off_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&DayOffStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        let decision: DayOffDecision = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(decision.resulting_status(), DayOffStatus::Rejected);
    }

    #[test]
    fn test_empty_worker_summary() {
        let summary = WorkerSummary::empty("w1", "Sara");
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.days_worked, 0);
        assert_eq!(summary.approved_days_off, 0);
    }
}
