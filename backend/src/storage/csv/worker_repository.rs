//! YAML-backed worker roster.
//!
//! ```yaml
//! workers:
//!   - id: w1
//!     full_name: Sara Ahmadi
//!   - id: w2
//!     full_name: Reza Karimi
//!     active: false
//! ```
//!
//! A missing `workers.yaml` is an empty roster.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::domain::models::worker::Worker;
use crate::storage::traits::WorkerStorage;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RosterFile {
    #[serde(default)]
    workers: Vec<Worker>,
}

/// YAML-based worker roster repository
#[derive(Clone)]
pub struct WorkerRepository {
    connection: CsvConnection,
}

impl WorkerRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_roster(&self) -> Result<RosterFile> {
        let path = self.connection.workers_path();
        if !path.exists() {
            debug!("No roster at {}, using an empty one", path.display());
            return Ok(RosterFile::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(RosterFile::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl WorkerStorage for WorkerRepository {
    fn list_workers(&self) -> Result<Vec<Worker>> {
        Ok(self.read_roster()?.workers)
    }

    fn get_worker(&self, worker_id: &str) -> Result<Option<Worker>> {
        Ok(self
            .read_roster()?
            .workers
            .into_iter()
            .find(|w| w.id == worker_id))
    }

    fn store_worker(&self, worker: &Worker) -> Result<()> {
        let _guard = self.connection.lock()?;
        let mut roster = self.read_roster()?;
        match roster.workers.iter_mut().find(|w| w.id == worker.id) {
            Some(existing) => *existing = worker.clone(),
            None => roster.workers.push(worker.clone()),
        }
        self.connection
            .write_yaml(&self.connection.workers_path(), &roster)?;
        info!("Stored worker {} ({})", worker.id, worker.full_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    #[test]
    fn test_missing_roster_is_empty() {
        let env = TestEnvironment::new().unwrap();
        let repo = WorkerRepository::new(env.connection.clone());
        assert!(repo.list_workers().unwrap().is_empty());
    }

    #[test]
    fn test_store_keeps_roster_order_and_replaces() {
        let env = TestEnvironment::new().unwrap();
        let repo = WorkerRepository::new(env.connection.clone());
        repo.store_worker(&Worker::new("w2", "Reza Karimi")).unwrap();
        repo.store_worker(&Worker::new("w1", "Sara Ahmadi")).unwrap();

        let mut renamed = Worker::new("w2", "Reza K.");
        renamed.active = false;
        repo.store_worker(&renamed).unwrap();

        let workers = repo.list_workers().unwrap();
        let ids: Vec<&str> = workers.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["w2", "w1"]);
        assert_eq!(repo.get_worker("w2").unwrap().unwrap().full_name, "Reza K.");

        let active = repo.list_active_workers().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "w1");
    }

    #[test]
    fn test_reads_hand_written_roster() {
        let env = TestEnvironment::new().unwrap();
        fs::write(
            env.connection.workers_path(),
            concat!(
                "workers:\n",
                "  - id: w1\n    full_name: Sara Ahmadi\n",
                "  - id: w2\n    full_name: Reza Karimi\n    active: false\n",
            ),
        )
        .unwrap();
        let repo = WorkerRepository::new(env.connection.clone());
        let workers = repo.list_workers().unwrap();
        assert_eq!(workers.len(), 2);
        assert!(workers[0].active);
        assert!(!workers[1].active);
    }
}
