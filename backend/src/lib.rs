//! # Work-hours backend
//!
//! Jalali calendar conversion, monthly work-hour aggregation and the services
//! around them. Storage is file based; see [`storage::csv`].

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub mod config;
pub mod domain;
pub mod storage;

pub use config::AppConfig;
pub use storage::CsvConnection;

/// Main backend struct that wires every service to one data directory
pub struct Backend {
    pub time_log_service: domain::TimeLogService<CsvConnection>,
    pub day_off_service: domain::DayOffService<CsvConnection>,
    pub work_period_service: domain::WorkPeriodService<CsvConnection>,
    pub calendar_service: domain::CalendarService,
    connection: Arc<CsvConnection>,
}

impl Backend {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let connection = Arc::new(CsvConnection::new(&config.data_directory)?);
        info!("Using data directory {}", config.data_directory.display());

        Ok(Self {
            time_log_service: domain::TimeLogService::new(
                connection.clone(),
                config.max_daily_hours,
            ),
            day_off_service: domain::DayOffService::new(connection.clone()),
            work_period_service: domain::WorkPeriodService::new(connection.clone()),
            calendar_service: domain::CalendarService::new()?,
            connection,
        })
    }

    pub fn connection(&self) -> &CsvConnection {
        &self.connection
    }
}
