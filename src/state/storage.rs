// File system locations for the database and exported documents
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to get app data directory")]
    NoAppDataDir,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Get the app data directory, honouring the config override
pub fn get_app_data_dir(config: &AppConfig) -> StorageResult<PathBuf> {
    let app_dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .ok_or(StorageError::NoAppDataDir)?
            .join("com.sonarlipi.app"),
    };
    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Get the directory exported documents are written to
pub fn get_exports_dir(config: &AppConfig) -> StorageResult<PathBuf> {
    let exports_dir = get_app_data_dir(config)?.join(&config.exports_dir);
    fs::create_dir_all(&exports_dir)?;
    Ok(exports_dir)
}

/// Write a file into `dir` and return its path and SHA256 hash
pub fn store_file(dir: &Path, filename: &str, data: &[u8]) -> StorageResult<(PathBuf, String)> {
    fs::create_dir_all(dir)?;

    let file_path = dir.join(filename);
    let mut file = fs::File::create(&file_path)?;
    file.write_all(data)?;
    file.flush()?;

    Ok((file_path, calculate_sha256(data)))
}

/// Calculate SHA256 hash of data
pub fn calculate_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
