//! # Storage Module
//!
//! Persistence for time logs, day-off requests and the worker roster.
//!
//! Domain services depend only on the traits in [`traits`]; the file-based
//! implementation in [`csv`] stores one CSV file per record type and the
//! roster as YAML inside a single data directory.

pub mod csv;
pub mod traits;

pub use self::csv::CsvConnection;
pub use traits::{Connection, DayOffReview, DayOffStorage, TimeLogStorage, WorkerStorage};
