//! Calendar domain logic for the worker dashboard.
//!
//! Builds a Jalali month as a Saturday-first grid with each day's logged hours
//! and day-off status, and keeps the month the dashboard is focused on. The UI
//! only renders cells; every date computation happens here.

use anyhow::{anyhow, Result};
use chrono::Local;
use shared::{CalendarDay, CalendarDayType, CalendarMonth, DayOffStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::domain::authorization::Session;
use crate::domain::day_off_service::DayOffService;
use crate::domain::jalali::{self, CalendarError, JalaliDate, JalaliMonth};
use crate::domain::models::day_off::DayOffRequest;
use crate::domain::models::time_log::TimeLogEntry;
use crate::domain::time_log_service::TimeLogService;
use crate::storage::Connection;

/// Calendar service that handles all calendar-related business logic
#[derive(Clone)]
pub struct CalendarService {
    /// Month shown by the dashboard; kept in memory only
    focus_month: Arc<Mutex<JalaliMonth>>,
}

impl CalendarService {
    /// Focused on the current Jalali month
    pub fn new() -> Result<Self> {
        Ok(Self::focused_on(Self::current_month()?))
    }

    pub fn focused_on(month: JalaliMonth) -> Self {
        Self {
            focus_month: Arc::new(Mutex::new(month)),
        }
    }

    /// The Jalali month containing today's local date
    pub fn current_month() -> Result<JalaliMonth, CalendarError> {
        JalaliMonth::containing(Local::now().date_naive())
    }

    /// A worker's month grid, fetched through the services so the usual
    /// read rules apply
    pub fn worker_month<C: Connection>(
        &self,
        time_log_service: &TimeLogService<C>,
        day_off_service: &DayOffService<C>,
        session: &Session,
        worker_id: &str,
        month: JalaliMonth,
    ) -> Result<CalendarMonth> {
        let logs = time_log_service.list_month(session, worker_id, month)?;
        let day_offs: Vec<DayOffRequest> = day_off_service
            .list_month(session, month, None)?
            .into_iter()
            .filter(|r| r.worker_id == worker_id)
            .collect();
        Ok(self.generate_month(month, &logs, &day_offs)?)
    }

    /// Lay out a month: padding cells up to the first weekday (Saturday = 0),
    /// then one cell per day
    pub fn generate_month(
        &self,
        month: JalaliMonth,
        logs: &[TimeLogEntry],
        day_offs: &[DayOffRequest],
    ) -> Result<CalendarMonth, CalendarError> {
        let days_in_month = month.days()?;
        let first_day = jalali::persian_weekday_index(month.first_day().weekday()?);
        debug!(
            "Generating calendar for {}: {} days, first weekday {}",
            month, days_in_month, first_day
        );

        let mut hours_by_date: HashMap<&str, f64> = HashMap::new();
        for entry in logs {
            *hours_by_date.entry(entry.date.as_str()).or_insert(0.0) += entry.hours_worked;
        }
        let status_by_date = Self::day_off_status_by_date(day_offs);

        let mut days = Vec::with_capacity((first_day + days_in_month) as usize);
        for _ in 0..first_day {
            days.push(CalendarDay::padding());
        }

        for day in 1..=days_in_month {
            let date = JalaliDate::new(month.year(), month.month(), day)?;
            let gregorian = date.to_gregorian()?;
            let key = gregorian.format("%Y-%m-%d").to_string();
            let weekday = date.weekday()?;

            days.push(CalendarDay {
                day,
                weekday_name: jalali::weekday_name(weekday).to_string(),
                is_off_day: jalali::is_off_day(weekday),
                hours_logged: hours_by_date.get(key.as_str()).copied(),
                day_off_status: status_by_date.get(key.as_str()).copied(),
                gregorian_date: key,
                day_type: CalendarDayType::MonthDay,
            });
        }

        Ok(CalendarMonth {
            year: month.year(),
            month: month.month(),
            month_name: month.name().to_string(),
            days,
            first_day_of_week: first_day,
        })
    }

    /// When a day has several requests the most decisive one is shown:
    /// approved, then pending, then rejected
    fn day_off_status_by_date(day_offs: &[DayOffRequest]) -> HashMap<&str, DayOffStatus> {
        fn rank(status: DayOffStatus) -> u8 {
            match status {
                DayOffStatus::Approved => 2,
                DayOffStatus::Pending => 1,
                DayOffStatus::Rejected => 0,
            }
        }

        let mut statuses: HashMap<&str, DayOffStatus> = HashMap::new();
        for request in day_offs {
            statuses
                .entry(request.request_date.as_str())
                .and_modify(|current| {
                    if rank(request.status) > rank(*current) {
                        *current = request.status;
                    }
                })
                .or_insert(request.status);
        }
        statuses
    }

    pub fn focus_month(&self) -> Result<JalaliMonth> {
        self.focus_month
            .lock()
            .map(|month| *month)
            .map_err(|_| anyhow!("Calendar focus lock poisoned"))
    }

    pub fn set_focus_month(&self, month: JalaliMonth) -> Result<JalaliMonth> {
        let mut focus = self
            .focus_month
            .lock()
            .map_err(|_| anyhow!("Calendar focus lock poisoned"))?;
        *focus = month;
        Ok(month)
    }

    pub fn navigate_previous_month(&self) -> Result<JalaliMonth> {
        let previous = self.focus_month()?.previous()?;
        self.set_focus_month(previous)
    }

    pub fn navigate_next_month(&self) -> Result<JalaliMonth> {
        let next = self.focus_month()?.next()?;
        self.set_focus_month(next)
    }
}
