//! # Application Configuration
//!
//! Optional YAML file, e.g. `workhours.yaml`:
//!
//! ```yaml
//! data_directory: /var/lib/workhours
//! max_daily_hours: 12
//! log_filter: info,workhours_backend=debug
//! ```
//!
//! Missing keys take their defaults. `WORKHOURS_DATA_DIR` overrides the data
//! directory from the file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_DIR_ENV: &str = "WORKHOURS_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `workers.yaml` and the CSV files
    pub data_directory: PathBuf,
    /// Upper bound for a single day's logged hours
    pub max_daily_hours: f64,
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            max_daily_hours: 24.0,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path` when given, apply the environment override, validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_data_directory_override(std::env::var(DATA_DIR_ENV).ok());
        config.validate()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn with_data_directory_override(mut self, data_directory: Option<String>) -> Self {
        if let Some(dir) = data_directory.filter(|d| !d.trim().is_empty()) {
            self.data_directory = PathBuf::from(dir);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.max_daily_hours.is_finite()
            || self.max_daily_hours <= 0.0
            || self.max_daily_hours > 24.0
        {
            bail!(
                "max_daily_hours must be in (0, 24], got {}",
                self.max_daily_hours
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data_directory, PathBuf::from("data"));
        assert_eq!(config.max_daily_hours, 24.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workhours.yaml");
        fs::write(&path, "max_daily_hours: 12\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.max_daily_hours, 12.0);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.data_directory, PathBuf::from("data"));
    }

    #[test]
    fn test_data_directory_override() {
        let config = AppConfig::default().with_data_directory_override(Some("/srv/wh".to_string()));
        assert_eq!(config.data_directory, PathBuf::from("/srv/wh"));

        let config = AppConfig::default().with_data_directory_override(Some(" ".to_string()));
        assert_eq!(config.data_directory, PathBuf::from("data"));
    }

    #[test]
    fn test_invalid_max_hours() {
        let mut config = AppConfig::default();
        config.max_daily_hours = 30.0;
        assert!(config.validate().is_err());
        config.max_daily_hours = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(AppConfig::from_file(&dir.path().join("absent.yaml")).is_err());
    }
}
