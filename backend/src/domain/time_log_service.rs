//! Write path for daily time logs.
//!
//! User input arrives as a Jalali date; it is converted with
//! [`jalali::format_for_storage`] and upserted by `(worker_id, date)`, so
//! logging a day twice corrects the first entry.

use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::authorization::{self, Capability, Session};
use crate::domain::commands::time_log::{LogHoursCommand, LogHoursResult};
use crate::domain::jalali::{self, JalaliDate, JalaliMonth};
use crate::domain::models::time_log::TimeLogEntry;
use crate::storage::{Connection, TimeLogStorage, WorkerStorage};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeLogError {
    #[error("Hours worked must be between 0 and {max}, got {hours}")]
    InvalidHours { hours: f64, max: f64 },
    #[error("Unknown worker: {0}")]
    UnknownWorker(String),
}

pub struct TimeLogService<C: Connection> {
    time_log_repository: C::TimeLogRepository,
    worker_repository: C::WorkerRepository,
    max_daily_hours: f64,
}

impl<C: Connection> TimeLogService<C> {
    pub fn new(connection: Arc<C>, max_daily_hours: f64) -> Self {
        Self {
            time_log_repository: connection.create_time_log_repository(),
            worker_repository: connection.create_worker_repository(),
            max_daily_hours,
        }
    }

    pub fn log_hours(&self, session: &Session, command: LogHoursCommand) -> Result<LogHoursResult> {
        authorization::require_for_worker(session, &command.worker_id, Capability::LogOwnHours)?;

        let hours = command.hours_worked;
        if !hours.is_finite() || hours < 0.0 || hours > self.max_daily_hours {
            return Err(TimeLogError::InvalidHours {
                hours,
                max: self.max_daily_hours,
            }
            .into());
        }

        if self.worker_repository.get_worker(&command.worker_id)?.is_none() {
            return Err(TimeLogError::UnknownWorker(command.worker_id).into());
        }

        let date = jalali::format_for_storage(&command.date)?;
        let entry = TimeLogEntry::new(&command.worker_id, &date, hours, command.description);
        let (entry, outcome) = self.time_log_repository.upsert_time_log(&entry)?;

        info!(
            "{} logged {} hours for {} on {} ({})",
            session.user_id, entry.hours_worked, entry.worker_id, command.date, entry.date
        );
        Ok(LogHoursResult { entry, outcome })
    }

    /// A worker's entries for one Jalali month, in date order
    pub fn list_month(
        &self,
        session: &Session,
        worker_id: &str,
        month: JalaliMonth,
    ) -> Result<Vec<TimeLogEntry>> {
        authorization::require_read_for_worker(session, worker_id)?;
        let (start, end) = jalali::month_range(month)?;
        self.time_log_repository
            .list_time_logs(&start, &end, Some(worker_id))
    }

    /// Returns false when there was nothing logged on that date
    pub fn delete_entry(
        &self,
        session: &Session,
        worker_id: &str,
        date: JalaliDate,
    ) -> Result<bool> {
        authorization::require_for_worker(session, worker_id, Capability::LogOwnHours)?;
        let key = jalali::format_for_storage(&date)?;
        let deleted = self.time_log_repository.delete_time_log(worker_id, &key)?;
        if deleted {
            info!("{} deleted the entry of {} on {}", session.user_id, worker_id, date);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::authorization::{AuthorizationError, Role};
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::CsvConnection;
    use shared::UpsertOutcome;

    fn setup() -> (TestEnvironment, TimeLogService<CsvConnection>) {
        let env =
            TestEnvironment::with_roster(&[("w1", "Sara Ahmadi"), ("w2", "Reza Karimi")]).unwrap();
        let service = TimeLogService::new(Arc::new(env.connection.clone()), 24.0);
        (env, service)
    }

    fn worker() -> Session {
        Session::new("w1", "Sara Ahmadi", Role::Worker)
    }

    fn command(worker_id: &str, date: &str, hours: f64) -> LogHoursCommand {
        LogHoursCommand {
            worker_id: worker_id.to_string(),
            date: date.parse().unwrap(),
            hours_worked: hours,
            description: None,
        }
    }

    #[test]
    fn test_log_hours_converts_to_storage_key() {
        let (_env, service) = setup();
        let result = service
            .log_hours(&worker(), command("w1", "1403/01/01", 8.0))
            .unwrap();
        assert_eq!(result.outcome, UpsertOutcome::Created);
        assert_eq!(result.entry.date, "2024-03-20");
    }

    #[test]
    fn test_second_log_on_same_day_updates() {
        let (_env, service) = setup();
        let first = service
            .log_hours(&worker(), command("w1", "1403/01/01", 8.0))
            .unwrap();
        let second = service
            .log_hours(&worker(), command("w1", "1403/01/01", 5.0))
            .unwrap();
        assert_eq!(second.outcome, UpsertOutcome::Updated);
        assert_eq!(second.entry.id, first.entry.id);

        let month = JalaliMonth::new(1403, 1).unwrap();
        let entries = service.list_month(&worker(), "w1", month).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hours_worked, 5.0);
    }

    #[test]
    fn test_hours_are_bounded() {
        let (_env, service) = setup();
        for hours in [-1.0, 24.5, f64::NAN] {
            let err = service
                .log_hours(&worker(), command("w1", "1403/01/02", hours))
                .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<TimeLogError>(),
                Some(TimeLogError::InvalidHours { .. })
            ));
        }
        assert!(service
            .log_hours(&worker(), command("w1", "1403/01/02", 0.0))
            .is_ok());
    }

    #[test]
    fn test_workers_cannot_log_for_others() {
        let (_env, service) = setup();
        let err = service
            .log_hours(&worker(), command("w2", "1403/01/02", 8.0))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuthorizationError>(),
            Some(AuthorizationError::NotOwnRecord { .. })
        ));

        let admin = Session::new("a1", "Admin", Role::Admin);
        assert!(service
            .log_hours(&admin, command("w2", "1403/01/02", 8.0))
            .is_ok());
    }

    #[test]
    fn test_unknown_worker_is_rejected() {
        let (_env, service) = setup();
        let admin = Session::new("a1", "Admin", Role::Admin);
        let err = service
            .log_hours(&admin, command("ghost", "1403/01/02", 8.0))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<TimeLogError>(),
            Some(&TimeLogError::UnknownWorker("ghost".to_string()))
        );
    }

    #[test]
    fn test_list_month_and_delete() {
        let (_env, service) = setup();
        service
            .log_hours(&worker(), command("w1", "1403/01/31", 6.0))
            .unwrap();
        service
            .log_hours(&worker(), command("w1", "1403/02/01", 7.0))
            .unwrap();

        let farvardin = JalaliMonth::new(1403, 1).unwrap();
        let entries = service.list_month(&worker(), "w1", farvardin).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "2024-04-19");

        let other = Session::new("w2", "Reza Karimi", Role::Worker);
        assert!(service.list_month(&other, "w1", farvardin).is_err());

        let date: JalaliDate = "1403/01/31".parse().unwrap();
        assert!(service.delete_entry(&worker(), "w1", date).unwrap());
        assert!(!service.delete_entry(&worker(), "w1", date).unwrap());
    }
}
