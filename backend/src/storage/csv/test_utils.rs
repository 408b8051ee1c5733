/// Test utilities with RAII cleanup of the data directory
///
/// The temporary directory is removed when the environment is dropped, even if
/// the test panics.
use anyhow::Result;
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::domain::models::worker::Worker;
use crate::storage::traits::{Connection, WorkerStorage};

pub struct TestEnvironment {
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    /// Environment with a roster already on disk
    pub fn with_roster(workers: &[(&str, &str)]) -> Result<Self> {
        let env = Self::new()?;
        let repo = env.connection.create_worker_repository();
        for (id, name) in workers {
            repo.store_worker(&Worker::new(id, name))?;
        }
        Ok(env)
    }
}
