// Application configuration
// Optional JSON file; anything missing falls back to the defaults below

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::grid::DEFAULT_ROW_COUNT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime settings for storage, export and logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the platform app data directory
    pub data_dir: Option<PathBuf>,

    /// SQLite file name inside the data directory
    pub database_file: String,

    /// Key under which the composition list is stored
    pub storage_key: String,

    /// Rows given to a newly created composition
    pub default_row_count: usize,

    /// Export directory, relative to the data directory
    pub exports_dir: String,

    /// One of: error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: None,
            database_file: "sonar_lipi.db".to_string(),
            storage_key: "compositions".to_string(),
            default_row_count: DEFAULT_ROW_COUNT,
            exports_dir: "exports".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file, or return defaults when the file does not exist
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Parsed log level; unrecognized values mean `Info`
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}
