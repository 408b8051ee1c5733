use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use super::day_off_repository::DayOffRepository;
use super::time_log_repository::TimeLogRepository;
use super::worker_repository::WorkerRepository;
use crate::storage::traits::Connection;

const TIME_LOGS_FILE: &str = "time_logs.csv";
const DAY_OFFS_FILE: &str = "day_off_requests.csv";
const WORKERS_FILE: &str = "workers.yaml";

/// CsvConnection owns the data directory and serializes read-modify-write
/// cycles on its files
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn time_logs_path(&self) -> PathBuf {
        self.base_directory.join(TIME_LOGS_FILE)
    }

    pub fn day_offs_path(&self) -> PathBuf {
        self.base_directory.join(DAY_OFFS_FILE)
    }

    pub fn workers_path(&self) -> PathBuf {
        self.base_directory.join(WORKERS_FILE)
    }

    /// Held for the whole read-modify-write cycle of a repository
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| anyhow!("Storage write lock poisoned"))
    }

    /// Read every row of a CSV file; a missing file has no rows
    pub(crate) fn read_csv<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            debug!("{} does not exist yet, treating as empty", path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: T =
                result.with_context(|| format!("Failed to read row in {}", path.display()))?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Replace a CSV file atomically with the given rows
    pub(crate) fn write_csv<T: Serialize>(&self, path: &Path, rows: &[T]) -> Result<()> {
        let temp_path = path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&temp_path)
                .with_context(|| format!("Failed to create {}", temp_path.display()))?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }

    /// Replace a YAML file atomically
    pub(crate) fn write_yaml<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let yaml_content = serde_yaml::to_string(value)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml_content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

impl Connection for CsvConnection {
    type TimeLogRepository = TimeLogRepository;
    type DayOffRepository = DayOffRepository;
    type WorkerRepository = WorkerRepository;

    fn create_time_log_repository(&self) -> Self::TimeLogRepository {
        TimeLogRepository::new(self.clone())
    }

    fn create_day_off_repository(&self) -> Self::DayOffRepository {
        DayOffRepository::new(self.clone())
    }

    fn create_worker_repository(&self) -> Self::WorkerRepository {
        WorkerRepository::new(self.clone())
    }
}
