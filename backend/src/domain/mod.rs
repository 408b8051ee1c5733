//! # Domain Layer
//!
//! Business logic of the work-hours backend, independent of storage and of
//! any outer surface:
//!
//! - [`jalali`]: Gregorian <-> Jalali conversion and Persian calendar names
//! - [`work_period`]: pure monthly aggregation into worker summaries
//! - services for the write path ([`TimeLogService`], [`DayOffService`]),
//!   reports ([`WorkPeriodService`]) and the dashboard calendar
//!   ([`CalendarService`])
//! - [`authorization`]: the caller's session and the role capability table
//!
//! Services are generic over [`crate::storage::Connection`] and take the
//! caller's [`authorization::Session`] explicitly on every call.

pub mod authorization;
pub mod calendar;
pub mod commands;
pub mod day_off_service;
pub mod jalali;
pub mod mappers;
pub mod models;
pub mod time_log_service;
pub mod work_period;
pub mod work_period_service;

pub use calendar::CalendarService;
pub use day_off_service::{DayOffError, DayOffService};
pub use time_log_service::{TimeLogError, TimeLogService};
pub use work_period_service::WorkPeriodService;
