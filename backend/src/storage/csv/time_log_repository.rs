//! CSV-backed time log repository.
//!
//! ## File format
//!
//! `time_logs.csv` holds one row per `(worker_id, date)`:
//!
//! ```text
//! id,worker_id,date,hours_worked,description,created_at,updated_at
//! log::3f0e...,w1,2024-03-20,8,,2024-03-20T16:02:11Z,2024-03-20T16:02:11Z
//! ```
//!
//! `hours_worked` is decoded strictly. A value that is not a number makes the
//! read fail with a [`MalformedRecord`] naming the row id. Range queries check
//! every row's `date` first: a key that is not fixed-width `YYYY-MM-DD` would
//! compare wrongly as a string, so it is reported instead of skipped.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::UpsertOutcome;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::domain::jalali;
use crate::domain::models::time_log::TimeLogEntry;
use crate::domain::models::MalformedRecord;
use crate::storage::traits::TimeLogStorage;

/// One row of `time_logs.csv` as written on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TimeLogRecord {
    id: String,
    worker_id: String,
    date: String,
    hours_worked: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TimeLogRecord {
    fn from_domain(entry: &TimeLogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            worker_id: entry.worker_id.clone(),
            date: entry.date.clone(),
            hours_worked: entry.hours_worked.to_string(),
            description: entry.description.clone(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }

    fn into_domain(self) -> Result<TimeLogEntry, MalformedRecord> {
        let hours_worked = self.hours_worked.trim().parse::<f64>().map_err(|_| {
            MalformedRecord::new(
                &self.id,
                format!("hours_worked is not a number: {:?}", self.hours_worked),
            )
        })?;
        let entry = TimeLogEntry {
            id: self.id,
            worker_id: self.worker_id,
            date: self.date,
            hours_worked,
            description: self.description.filter(|d| !d.is_empty()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        entry.validate()?;
        Ok(entry)
    }
}

/// CSV-based time log repository
#[derive(Clone)]
pub struct TimeLogRepository {
    connection: CsvConnection,
}

impl TimeLogRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Result<Vec<TimeLogRecord>> {
        self.connection.read_csv(&self.connection.time_logs_path())
    }

    fn write_records(&self, records: &[TimeLogRecord]) -> Result<()> {
        self.connection
            .write_csv(&self.connection.time_logs_path(), records)
    }
}

impl TimeLogStorage for TimeLogRepository {
    fn upsert_time_log(&self, entry: &TimeLogEntry) -> Result<(TimeLogEntry, UpsertOutcome)> {
        let _guard = self.connection.lock()?;
        let mut records = self.read_records()?;

        let existing = records
            .iter()
            .position(|r| r.worker_id == entry.worker_id && r.date == entry.date);

        let (stored, outcome) = match existing {
            Some(index) => {
                let mut updated = TimeLogRecord::from_domain(entry);
                updated.id = records[index].id.clone();
                updated.created_at = records[index].created_at;
                updated.updated_at = Utc::now();
                records[index] = updated.clone();
                (updated, UpsertOutcome::Updated)
            }
            None => {
                let record = TimeLogRecord::from_domain(entry);
                records.push(record.clone());
                (record, UpsertOutcome::Created)
            }
        };

        self.write_records(&records)?;
        info!(
            "{:?} time log {} for worker {} on {}",
            outcome, stored.id, stored.worker_id, stored.date
        );
        Ok((stored.into_domain()?, outcome))
    }

    fn get_time_log(&self, worker_id: &str, date: &str) -> Result<Option<TimeLogEntry>> {
        let record = self
            .read_records()?
            .into_iter()
            .find(|r| r.worker_id == worker_id && r.date == date);
        match record {
            Some(record) => Ok(Some(record.into_domain()?)),
            None => Ok(None),
        }
    }

    fn list_time_logs(
        &self,
        start_date: &str,
        end_date: &str,
        worker_id: Option<&str>,
    ) -> Result<Vec<TimeLogEntry>> {
        let mut entries = Vec::new();
        for record in self.read_records()? {
            jalali::parse_storage_date(&record.date)
                .map_err(|e| MalformedRecord::new(&record.id, e.to_string()))?;
            if record.date.as_str() < start_date || record.date.as_str() > end_date {
                continue;
            }
            if let Some(worker_id) = worker_id {
                if record.worker_id != worker_id {
                    continue;
                }
            }
            entries.push(record.into_domain()?);
        }
        entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.worker_id.cmp(&b.worker_id)));
        debug!(
            "Listed {} time logs between {} and {}",
            entries.len(),
            start_date,
            end_date
        );
        Ok(entries)
    }

    fn delete_time_log(&self, worker_id: &str, date: &str) -> Result<bool> {
        let _guard = self.connection.lock()?;
        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|r| !(r.worker_id == worker_id && r.date == date));
        if records.len() == before {
            return Ok(false);
        }
        self.write_records(&records)?;
        info!("Deleted time log for worker {} on {}", worker_id, date);
        Ok(true)
    }
}
