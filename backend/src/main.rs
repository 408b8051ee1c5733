//! # workhours: command line entry point
//!
//! Converts dates between the Gregorian and Jalali calendars and drives the
//! work-hours services over a data directory.
//!
//! ## Global Options
//!
//! - `--config` / `WORKHOURS_CONFIG`: YAML configuration file.
//! - `--data-dir` / `WORKHOURS_DATA_DIR`: data directory, overrides the config.
//! - `--user-id`, `--role`: the session the command runs as.
//! - `--json`: print results as JSON.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use shared::{
    DayOffDecision, DayOffRequestInput, DayOffStatus, LogHoursRequest, ReviewDayOffRequest,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use workhours_backend::domain::authorization::{self, Capability, Role, Session};
use workhours_backend::domain::commands::day_off::{RequestDayOffCommand, ReviewDayOffCommand};
use workhours_backend::domain::commands::time_log::LogHoursCommand;
use workhours_backend::domain::jalali::{self, JalaliDate, JalaliMonth};
use workhours_backend::domain::mappers::{DayOffMapper, TimeLogMapper};
use workhours_backend::domain::models::worker::Worker;
use workhours_backend::domain::CalendarService;
use workhours_backend::storage::{Connection, WorkerStorage};
use workhours_backend::{AppConfig, Backend};

#[derive(Parser)]
#[command(name = "workhours", about = "Jalali calendar and worker hours tracking")]
struct Cli {
    /// YAML configuration file
    #[arg(long, env = "WORKHOURS_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory (overrides the configuration file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// User the command runs as
    #[arg(long, env = "WORKHOURS_USER", default_value = "admin")]
    user_id: String,

    /// Role of that user: super_admin, admin, client or worker
    #[arg(long, env = "WORKHOURS_ROLE", default_value = "admin")]
    role: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Gregorian date (YYYY-MM-DD) to Jalali
    ToJalali { date: String },
    /// Convert a Jalali date (1403/01/15) to its Gregorian storage key
    ToGregorian { date: String },
    /// First and last Gregorian day of a Jalali month
    MonthRange {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Monthly summaries of every active worker
    Summary {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// A worker's month as a Saturday-first calendar grid
    Calendar {
        #[arg(long)]
        worker: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// A worker's time logs for a month
    ListHours {
        #[arg(long)]
        worker: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Log hours on a Jalali date; logging the same day again corrects it
    LogHours {
        date: String,
        hours: f64,
        #[arg(long)]
        worker: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a logged day
    DeleteHours {
        date: String,
        #[arg(long)]
        worker: Option<String>,
    },
    /// Ask for a day off on a Jalali date
    RequestDayOff {
        date: String,
        reason: String,
        #[arg(long)]
        worker: Option<String>,
    },
    /// Approve or reject a pending day-off request
    ReviewDayOff {
        request_id: String,
        #[arg(value_enum)]
        decision: DecisionArg,
    },
    /// Day-off requests of a month
    ListDayOffs {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Add a worker to the roster or rename one
    AddWorker {
        id: String,
        full_name: String,
        #[arg(long)]
        inactive: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DecisionArg {
    Approve,
    Reject,
}

impl From<DecisionArg> for DayOffDecision {
    fn from(arg: DecisionArg) -> Self {
        match arg {
            DecisionArg::Approve => DayOffDecision::Approve,
            DecisionArg::Reject => DayOffDecision::Reject,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Approved,
    Rejected,
}

impl From<StatusArg> for DayOffStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => DayOffStatus::Pending,
            StatusArg::Approved => DayOffStatus::Approved,
            StatusArg::Rejected => DayOffStatus::Rejected,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_directory = dir.clone();
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let role: Role = cli.role.parse()?;
    let session = Session::new(&cli.user_id, &cli.user_id, role);

    match cli.command {
        Commands::ToJalali { ref date } => to_jalali(date, cli.json),
        Commands::ToGregorian { ref date } => to_gregorian(date, cli.json),
        Commands::MonthRange { year, month } => {
            let month = resolve_month(year, month)?;
            let (start, end) = jalali::month_range(month)?;
            if cli.json {
                print_json(&serde_json::json!({
                    "year": month.year(),
                    "month": month.month(),
                    "month_name": month.name(),
                    "start_date": start,
                    "end_date": end,
                }))
            } else {
                println!("{}: {} .. {}", month, start, end);
                Ok(())
            }
        }
        ref command => run_service_command(&config, &session, command, cli.json),
    }
}

fn run_service_command(
    config: &AppConfig,
    session: &Session,
    command: &Commands,
    json: bool,
) -> Result<()> {
    let backend = Backend::new(config)?;
    let own = |worker: &Option<String>| worker.clone().unwrap_or_else(|| session.user_id.clone());

    match command {
        Commands::Summary { year, month } => {
            let month = resolve_month(*year, *month)?;
            let report = backend.work_period_service.monthly_report(session, month)?;
            if json {
                return print_json(&report);
            }
            println!("{} ({} .. {})", month, report.start_date, report.end_date);
            for summary in &report.summaries {
                println!(
                    "  {:<12} {:<24} {:>7.2} h  {:>2} days  {:>2} days off",
                    summary.worker_id,
                    summary.worker_name,
                    summary.total_hours,
                    summary.days_worked,
                    summary.approved_days_off
                );
            }
            if !report.day_off_requests.is_empty() {
                println!("Day-off requests:");
                for request in &report.day_off_requests {
                    println!(
                        "  {} {} {} ({}) {}",
                        request.jalali_date,
                        request.worker_id,
                        request.status.persian_label(),
                        request.status,
                        request.id
                    );
                }
            }
            Ok(())
        }
        Commands::Calendar { worker, year, month } => {
            let month = resolve_month(*year, *month)?;
            let calendar = backend.calendar_service.worker_month(
                &backend.time_log_service,
                &backend.day_off_service,
                session,
                &own(worker),
                month,
            )?;
            if json {
                return print_json(&calendar);
            }
            println!("{}", month);
            for day in calendar.days.iter().filter(|d| d.day > 0) {
                let hours = day
                    .hours_logged
                    .map(|h| format!("{:.2} h", h))
                    .unwrap_or_default();
                let day_off = day
                    .day_off_status
                    .map(|s| s.persian_label().to_string())
                    .unwrap_or_default();
                let marker = if day.is_off_day { "*" } else { " " };
                println!(
                    "{}{:>2} {:<10} {} {:>8} {}",
                    marker, day.day, day.weekday_name, day.gregorian_date, hours, day_off
                );
            }
            Ok(())
        }
        Commands::ListHours { worker, year, month } => {
            let month = resolve_month(*year, *month)?;
            let entries = backend
                .time_log_service
                .list_month(session, &own(worker), month)?;
            let views = entries
                .iter()
                .map(TimeLogMapper::to_dto)
                .collect::<Result<Vec<_>, _>>()?;
            if json {
                return print_json(&views);
            }
            for view in &views {
                println!(
                    "{} {} {:>6.2} h {}",
                    view.jalali_date,
                    view.date,
                    view.hours_worked,
                    view.description.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }
        Commands::LogHours {
            date,
            hours,
            worker,
            description,
        } => {
            let request = LogHoursRequest {
                worker_id: worker.clone(),
                date: date.clone(),
                hours_worked: *hours,
                description: description.clone(),
            };
            let command = LogHoursCommand::from_request(session, request)?;
            let result = backend.time_log_service.log_hours(session, command)?;
            let view = TimeLogMapper::to_dto(&result.entry)?;
            if json {
                return print_json(&shared::LogHoursResponse {
                    entry: view,
                    outcome: result.outcome,
                });
            }
            println!(
                "{:?}: {} {} ({}) {} h",
                result.outcome, view.worker_id, view.jalali_date, view.date, view.hours_worked
            );
            Ok(())
        }
        Commands::DeleteHours { date, worker } => {
            let date: JalaliDate = date.parse()?;
            let deleted = backend
                .time_log_service
                .delete_entry(session, &own(worker), date)?;
            println!("{}", if deleted { "Deleted" } else { "Nothing logged on that date" });
            Ok(())
        }
        Commands::RequestDayOff { date, reason, worker } => {
            let input = DayOffRequestInput {
                worker_id: worker.clone(),
                date: date.clone(),
                reason: reason.clone(),
            };
            let command = RequestDayOffCommand::from_request(session, input)?;
            let request = backend.day_off_service.request_day_off(session, command)?;
            let view = DayOffMapper::to_dto(&request)?;
            if json {
                return print_json(&view);
            }
            println!("Requested {} for {} ({})", view.id, view.jalali_date, view.request_date);
            Ok(())
        }
        Commands::ReviewDayOff {
            request_id,
            decision,
        } => {
            let command = ReviewDayOffCommand::from(ReviewDayOffRequest {
                request_id: request_id.clone(),
                decision: (*decision).into(),
            });
            let request = backend.day_off_service.review(session, command)?;
            let view = DayOffMapper::to_dto(&request)?;
            if json {
                return print_json(&view);
            }
            println!("{} is now {}", view.id, view.status);
            Ok(())
        }
        Commands::ListDayOffs {
            year,
            month,
            status,
        } => {
            let month = resolve_month(*year, *month)?;
            let requests = backend.day_off_service.list_month(
                session,
                month,
                status.map(DayOffStatus::from),
            )?;
            let views = DayOffMapper::to_dtos(&requests)?;
            if json {
                return print_json(&views);
            }
            for view in &views {
                println!(
                    "{} {} {:<9} {} {}",
                    view.jalali_date, view.worker_id, view.status, view.id, view.reason
                );
            }
            Ok(())
        }
        Commands::AddWorker {
            id,
            full_name,
            inactive,
        } => {
            authorization::require(session, Capability::ManageWorkers)?;
            let mut worker = Worker::new(id, full_name);
            worker.active = !inactive;
            backend
                .connection()
                .create_worker_repository()
                .store_worker(&worker)?;
            info!("{} added worker {}", session.user_id, worker.id);
            Ok(())
        }
        Commands::ToJalali { .. } | Commands::ToGregorian { .. } | Commands::MonthRange { .. } => {
            Err(anyhow!("Calendar commands do not need the data directory"))
        }
    }
}

fn to_jalali(date: &str, json: bool) -> Result<()> {
    let gregorian = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Expected a Gregorian date as YYYY-MM-DD, got '{}'", date))?;
    let jalali_date = jalali::to_jalali(gregorian)?;
    let weekday = jalali::weekday_name(jalali_date.weekday()?);
    if json {
        return print_json(&serde_json::json!({
            "gregorian": gregorian.format("%Y-%m-%d").to_string(),
            "jalali": jalali_date.to_string(),
            "display": jalali::format_persian(&jalali_date),
            "weekday": weekday,
        }));
    }
    println!(
        "{} ({} {})",
        jalali_date,
        weekday,
        jalali::format_persian(&jalali_date)
    );
    Ok(())
}

fn to_gregorian(date: &str, json: bool) -> Result<()> {
    let jalali_date: JalaliDate = date.parse()?;
    let key = jalali::format_for_storage(&jalali_date)?;
    if json {
        return print_json(&serde_json::json!({
            "jalali": jalali_date.to_string(),
            "gregorian": key,
        }));
    }
    println!("{}", key);
    Ok(())
}

/// Both given, or neither for the current month
fn resolve_month(year: Option<i32>, month: Option<u32>) -> Result<JalaliMonth> {
    match (year, month) {
        (Some(year), Some(month)) => Ok(JalaliMonth::new(year, month)?),
        (None, None) => Ok(CalendarService::current_month()?),
        (Some(year), None) => Err(anyhow!("--month is required with --year {}", year)),
        (None, Some(month)) => {
            let current = CalendarService::current_month()?;
            Ok(JalaliMonth::new(current.year(), month)?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
