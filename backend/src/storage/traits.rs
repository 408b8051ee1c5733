//! # Storage Traits
//!
//! Storage abstractions the domain services are written against. The domain
//! only needs range queries over Gregorian storage keys, an upsert keyed by
//! `(worker_id, date)` and the worker roster; any backend that can provide
//! those can be plugged in through [`Connection`].

use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{DayOffStatus, UpsertOutcome};

use crate::domain::models::day_off::DayOffRequest;
use crate::domain::models::time_log::TimeLogEntry;
use crate::domain::models::worker::Worker;

/// Trait defining the interface for time log storage operations
pub trait TimeLogStorage: Send + Sync {
    /// Insert the entry, or replace hours and description of the existing
    /// entry for the same worker and date. The stored entry keeps its
    /// original id and `created_at`.
    fn upsert_time_log(&self, entry: &TimeLogEntry) -> Result<(TimeLogEntry, UpsertOutcome)>;

    /// Retrieve the entry of a worker on a date
    fn get_time_log(&self, worker_id: &str, date: &str) -> Result<Option<TimeLogEntry>>;

    /// List entries with `start_date <= date <= end_date`, optionally for one
    /// worker. Returned in date order.
    fn list_time_logs(
        &self,
        start_date: &str,
        end_date: &str,
        worker_id: Option<&str>,
    ) -> Result<Vec<TimeLogEntry>>;

    /// Returns true if an entry was found and deleted
    fn delete_time_log(&self, worker_id: &str, date: &str) -> Result<bool>;
}

/// Result of [`DayOffStorage::review_day_off`]
#[derive(Debug, Clone, PartialEq)]
pub enum DayOffReview {
    /// The request was pending and now carries the decision
    Reviewed(DayOffRequest),
    /// The request had already been decided; it is returned unchanged
    AlreadyReviewed(DayOffRequest),
    NotFound,
}

/// Trait defining the interface for day-off request storage operations
pub trait DayOffStorage: Send + Sync {
    /// Store a new request unless the same worker already holds an open
    /// (pending or approved) request on that date. Check and write happen
    /// under one lock. Returns false when nothing was stored.
    fn store_day_off(&self, request: &DayOffRequest) -> Result<bool>;

    /// Retrieve a request by ID
    fn get_day_off(&self, request_id: &str) -> Result<Option<DayOffRequest>>;

    /// Move a pending request to `status`. The pending check and the write
    /// happen under one lock, so a request is decided at most once.
    fn review_day_off(
        &self,
        request_id: &str,
        status: DayOffStatus,
        reviewed_by: &str,
        reviewed_at: DateTime<Utc>,
    ) -> Result<DayOffReview>;

    /// List requests with `start_date <= request_date <= end_date`, optionally
    /// filtered by worker and status. Returned in date order.
    fn list_day_offs(
        &self,
        start_date: &str,
        end_date: &str,
        worker_id: Option<&str>,
        status: Option<DayOffStatus>,
    ) -> Result<Vec<DayOffRequest>>;
}

/// Trait defining the interface for the worker roster
pub trait WorkerStorage: Send + Sync {
    /// All workers in roster order
    fn list_workers(&self) -> Result<Vec<Worker>>;

    /// Workers that should appear in monthly summaries
    fn list_active_workers(&self) -> Result<Vec<Worker>> {
        Ok(self
            .list_workers()?
            .into_iter()
            .filter(|w| w.active)
            .collect())
    }

    fn get_worker(&self, worker_id: &str) -> Result<Option<Worker>>;

    /// Add a worker or replace the one with the same ID
    fn store_worker(&self, worker: &Worker) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// Abstracts the concrete backend and provides factory methods for creating
/// repositories, so services can be generic over the storage.
pub trait Connection: Send + Sync + Clone {
    type TimeLogRepository: TimeLogStorage;
    type DayOffRepository: DayOffStorage;
    type WorkerRepository: WorkerStorage;

    fn create_time_log_repository(&self) -> Self::TimeLogRepository;
    fn create_day_off_repository(&self) -> Self::DayOffRepository;
    fn create_worker_repository(&self) -> Self::WorkerRepository;
}
