use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("configuration backup `{0}` not found")]
    BackupNotFound(String),
}
