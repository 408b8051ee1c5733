//! # CSV Storage Module
//!
//! File-based storage for the work-hours backend. Everything lives in one data
//! directory:
//!
//! ```text
//! data/
//! ├── workers.yaml            ← worker roster
//! ├── time_logs.csv           ← one row per (worker, date)
//! └── day_off_requests.csv    ← one row per request
//! ```
//!
//! Dates are stored as Gregorian `YYYY-MM-DD` keys. Every write rewrites the
//! whole file through a temp file and a rename.

pub mod connection;
pub mod day_off_repository;
pub mod time_log_repository;
pub mod worker_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use day_off_repository::DayOffRepository;
pub use time_log_repository::TimeLogRepository;
pub use worker_repository::WorkerRepository;
