//! Monthly aggregation of time logs and day-off requests.
//!
//! A [`WorkPeriod`] is one Jalali month expressed as an inclusive range of
//! Gregorian storage keys. Storage keys are fixed-width `YYYY-MM-DD` strings,
//! so range checks are plain string comparisons, the same comparison the
//! record store uses when it fetches a month.
//!
//! [`aggregate`] is pure: callers fetch records and the roster, this module
//! only reduces them into one [`WorkerSummary`] per roster worker.

use shared::WorkerSummary;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::domain::jalali::{self, CalendarError, JalaliMonth};
use crate::domain::models::day_off::DayOffRequest;
use crate::domain::models::time_log::TimeLogEntry;
use crate::domain::models::worker::Worker;
use crate::domain::models::MalformedRecord;

/// One Jalali month as an inclusive range of storage keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPeriod {
    month: JalaliMonth,
    start_date: String,
    end_date: String,
}

impl WorkPeriod {
    pub fn for_month(month: JalaliMonth) -> Result<Self, CalendarError> {
        let (start_date, end_date) = jalali::month_range(month)?;
        Ok(Self {
            month,
            start_date,
            end_date,
        })
    }

    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        Self::for_month(JalaliMonth::new(year, month)?)
    }

    pub fn month(&self) -> JalaliMonth {
        self.month
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    /// Inclusive on both ends
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start_date.as_str() && date <= self.end_date.as_str()
    }
}

/// Reduce a month's records into one summary per roster worker, in roster
/// order. Workers without activity get zero-filled summaries; records of
/// workers missing from the roster are ignored.
///
/// Aggregation stops at the first malformed record (bad hours or a date that
/// is not a storage key) and reports it, it never coerces bad input to zero.
pub fn aggregate(
    period: &WorkPeriod,
    roster: &[Worker],
    time_logs: &[TimeLogEntry],
    day_offs: &[DayOffRequest],
) -> Result<Vec<WorkerSummary>, MalformedRecord> {
    if roster.is_empty() {
        debug!("Empty roster for {}, nothing to aggregate", period.month());
        return Ok(Vec::new());
    }

    let known: HashSet<&str> = roster.iter().map(|w| w.id.as_str()).collect();

    let mut hours: HashMap<&str, f64> = HashMap::new();
    let mut dates: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut unknown_records = 0usize;

    for entry in time_logs {
        entry.validate()?;
        if !period.contains(&entry.date) {
            continue;
        }
        if !known.contains(entry.worker_id.as_str()) {
            unknown_records += 1;
            continue;
        }
        *hours.entry(entry.worker_id.as_str()).or_insert(0.0) += entry.hours_worked;
        dates
            .entry(entry.worker_id.as_str())
            .or_default()
            .insert(entry.date.as_str());
    }

    let mut approved: HashMap<&str, u32> = HashMap::new();
    for request in day_offs {
        jalali::parse_storage_date(&request.request_date)
            .map_err(|e| MalformedRecord::new(&request.id, e.to_string()))?;
        if !request.is_approved() || !period.contains(&request.request_date) {
            continue;
        }
        if !known.contains(request.worker_id.as_str()) {
            unknown_records += 1;
            continue;
        }
        *approved.entry(request.worker_id.as_str()).or_insert(0) += 1;
    }

    if unknown_records > 0 {
        warn!(
            "Ignored {} records in {} for workers missing from the roster",
            unknown_records,
            period.month()
        );
    }

    let summaries = roster
        .iter()
        .map(|worker| {
            let id = worker.id.as_str();
            WorkerSummary {
                worker_id: worker.id.clone(),
                worker_name: worker.full_name.clone(),
                total_hours: hours.get(id).copied().unwrap_or(0.0),
                days_worked: dates.get(id).map(|d| d.len() as u32).unwrap_or(0),
                approved_days_off: approved.get(id).copied().unwrap_or(0),
            }
        })
        .collect();

    Ok(summaries)
}

/// All requests in the period whatever their status, ordered by date then
/// worker, for the admin review list
pub fn review_requests(period: &WorkPeriod, day_offs: &[DayOffRequest]) -> Vec<DayOffRequest> {
    let mut requests: Vec<DayOffRequest> = day_offs
        .iter()
        .filter(|r| period.contains(&r.request_date))
        .cloned()
        .collect();
    requests.sort_by(|a, b| {
        a.request_date
            .cmp(&b.request_date)
            .then_with(|| a.worker_id.cmp(&b.worker_id))
    });
    requests
}
