use shared::{LogHoursRequest, UpsertOutcome};

use crate::domain::authorization::Session;
use crate::domain::jalali::{CalendarError, JalaliDate};
use crate::domain::models::time_log::TimeLogEntry;

/// Log (or correct) a worker's hours on one Jalali date
#[derive(Debug, Clone, PartialEq)]
pub struct LogHoursCommand {
    pub worker_id: String,
    pub date: JalaliDate,
    pub hours_worked: f64,
    pub description: Option<String>,
}

impl LogHoursCommand {
    /// Build from a wire request. Without an explicit worker the caller logs
    /// their own hours.
    pub fn from_request(
        session: &Session,
        request: LogHoursRequest,
    ) -> Result<Self, CalendarError> {
        Ok(Self {
            worker_id: request
                .worker_id
                .unwrap_or_else(|| session.user_id.clone()),
            date: request.date.parse()?,
            hours_worked: request.hours_worked,
            description: request
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogHoursResult {
    pub entry: TimeLogEntry,
    pub outcome: UpsertOutcome,
}
