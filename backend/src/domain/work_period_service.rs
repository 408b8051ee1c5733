//! Monthly payroll reports.
//!
//! Fetches one Jalali month of records plus the roster and hands them to
//! [`work_period::aggregate`].

use anyhow::{anyhow, Result};
use shared::{MonthlyReport, WorkerSummary};
use std::sync::Arc;
use tracing::info;

use crate::domain::authorization::{self, Capability, Session};
use crate::domain::jalali::JalaliMonth;
use crate::domain::mappers::DayOffMapper;
use crate::domain::work_period::{self, WorkPeriod};
use crate::storage::{Connection, DayOffStorage, TimeLogStorage, WorkerStorage};

pub struct WorkPeriodService<C: Connection> {
    time_log_repository: C::TimeLogRepository,
    day_off_repository: C::DayOffRepository,
    worker_repository: C::WorkerRepository,
}

impl<C: Connection> WorkPeriodService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            time_log_repository: connection.create_time_log_repository(),
            day_off_repository: connection.create_day_off_repository(),
            worker_repository: connection.create_worker_repository(),
        }
    }

    /// Summaries of every active worker plus all day-off requests of the month
    pub fn monthly_report(&self, session: &Session, month: JalaliMonth) -> Result<MonthlyReport> {
        authorization::require(session, Capability::ViewReports)?;

        let period = WorkPeriod::for_month(month)?;
        let roster = self.worker_repository.list_active_workers()?;
        let time_logs = self.time_log_repository.list_time_logs(
            period.start_date(),
            period.end_date(),
            None,
        )?;
        let day_offs = self.day_off_repository.list_day_offs(
            period.start_date(),
            period.end_date(),
            None,
            None,
        )?;

        let summaries = work_period::aggregate(&period, &roster, &time_logs, &day_offs)?;
        let requests = work_period::review_requests(&period, &day_offs);

        info!(
            "Monthly report for {}: {} workers, {} time logs, {} day-off requests",
            month,
            summaries.len(),
            time_logs.len(),
            requests.len()
        );

        Ok(MonthlyReport {
            year: month.year(),
            month: month.month(),
            month_name: month.name().to_string(),
            start_date: period.start_date().to_string(),
            end_date: period.end_date().to_string(),
            summaries,
            day_off_requests: DayOffMapper::to_dtos(&requests)?,
        })
    }

    /// One worker's summary. Workers may read their own.
    pub fn worker_summary(
        &self,
        session: &Session,
        worker_id: &str,
        month: JalaliMonth,
    ) -> Result<WorkerSummary> {
        authorization::require_read_for_worker(session, worker_id)?;

        let worker = self
            .worker_repository
            .get_worker(worker_id)?
            .ok_or_else(|| anyhow!("Unknown worker: {}", worker_id))?;

        let period = WorkPeriod::for_month(month)?;
        let time_logs = self.time_log_repository.list_time_logs(
            period.start_date(),
            period.end_date(),
            Some(worker_id),
        )?;
        let day_offs = self.day_off_repository.list_day_offs(
            period.start_date(),
            period.end_date(),
            Some(worker_id),
            None,
        )?;

        let summary = work_period::aggregate(&period, &[worker], &time_logs, &day_offs)?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No summary produced for {}", worker_id))?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::authorization::Role;
    use crate::domain::models::day_off::DayOffRequest;
    use crate::domain::models::time_log::TimeLogEntry;
    use crate::domain::models::MalformedRecord;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::CsvConnection;
    use shared::DayOffStatus;
    use std::fs;

    fn setup() -> (TestEnvironment, WorkPeriodService<CsvConnection>) {
        let env = TestEnvironment::with_roster(&[
            ("w1", "Sara Ahmadi"),
            ("w2", "Reza Karimi"),
            ("w3", "Mina Rahimi"),
        ])
        .unwrap();
        let service = WorkPeriodService::new(Arc::new(env.connection.clone()));
        (env, service)
    }

    fn seed(env: &TestEnvironment) {
        let logs = env.connection.create_time_log_repository();
        for (worker, date, hours) in [
            ("w1", "2024-03-19", 5.0),
            ("w1", "2024-03-20", 8.0),
            ("w1", "2024-04-19", 6.0),
            ("w1", "2024-04-20", 7.0),
            ("w2", "2024-04-01", 3.5),
        ] {
            logs.upsert_time_log(&TimeLogEntry::new(worker, date, hours, None))
                .unwrap();
        }

        let day_offs = env.connection.create_day_off_repository();
        let mut approved = DayOffRequest::new("w2", "2024-03-28", "family");
        approved.status = DayOffStatus::Approved;
        day_offs.store_day_off(&approved).unwrap();
        day_offs
            .store_day_off(&DayOffRequest::new("w3", "2024-04-02", "trip"))
            .unwrap();
    }

    fn admin() -> Session {
        Session::new("a1", "Admin", Role::Admin)
    }

    #[test]
    fn test_monthly_report_for_farvardin_1403() {
        let (env, service) = setup();
        seed(&env);

        let month = JalaliMonth::new(1403, 1).unwrap();
        let report = service.monthly_report(&admin(), month).unwrap();

        assert_eq!(report.start_date, "2024-03-20");
        assert_eq!(report.end_date, "2024-04-19");
        assert_eq!(report.month_name, "فروردین");
        assert_eq!(report.summaries.len(), 3);

        let w1 = &report.summaries[0];
        assert_eq!(w1.total_hours, 14.0);
        assert_eq!(w1.days_worked, 2);

        let w2 = &report.summaries[1];
        assert_eq!(w2.total_hours, 3.5);
        assert_eq!(w2.approved_days_off, 1);

        assert_eq!(report.summaries[2], WorkerSummary::empty("w3", "Mina Rahimi"));
        assert_eq!(report.day_off_requests.len(), 2);
        assert_eq!(report.day_off_requests[1].status, DayOffStatus::Pending);
    }

    #[test]
    fn test_esfand_lengths_follow_leap_years() {
        let (_env, service) = setup();
        let esfand_1403 = service
            .monthly_report(&admin(), JalaliMonth::new(1403, 12).unwrap())
            .unwrap();
        assert_eq!(esfand_1403.start_date, "2025-02-19");
        assert_eq!(esfand_1403.end_date, "2025-03-20");

        let esfand_1402 = service
            .monthly_report(&admin(), JalaliMonth::new(1402, 12).unwrap())
            .unwrap();
        assert_eq!(esfand_1402.start_date, "2024-02-20");
        assert_eq!(esfand_1402.end_date, "2024-03-19");
    }

    #[test]
    fn test_report_requires_view_reports() {
        let (_env, service) = setup();
        let worker = Session::new("w1", "Sara Ahmadi", Role::Worker);
        assert!(service
            .monthly_report(&worker, JalaliMonth::new(1403, 1).unwrap())
            .is_err());
    }

    #[test]
    fn test_worker_summary() {
        let (env, service) = setup();
        seed(&env);
        let month = JalaliMonth::new(1403, 1).unwrap();

        let worker = Session::new("w1", "Sara Ahmadi", Role::Worker);
        let own = service.worker_summary(&worker, "w1", month).unwrap();
        assert_eq!(own.total_hours, 14.0);
        assert!(service.worker_summary(&worker, "w2", month).is_err());
        assert!(service.worker_summary(&admin(), "ghost", month).is_err());
    }

    #[test]
    fn test_corrupt_hours_abort_report() {
        let (env, service) = setup();
        fs::write(
            env.connection.time_logs_path(),
            "id,worker_id,date,hours_worked,description,created_at,updated_at\n\
             log::bad,w1,2024-03-25,abc,,2024-03-25T10:00:00Z,2024-03-25T10:00:00Z\n",
        )
        .unwrap();

        let err = service
            .monthly_report(&admin(), JalaliMonth::new(1403, 1).unwrap())
            .unwrap_err();
        let malformed = err.downcast_ref::<MalformedRecord>().unwrap();
        assert_eq!(malformed.record_id, "log::bad");
    }
}
