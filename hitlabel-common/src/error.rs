//! Error type shared by the API service and the generator

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Connection or statement failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cannot create database directory {}: {source}", .path.display())]
    DatabaseDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file exists but could not be read
    #[error("Cannot read config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed TOML or an unusable override value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Clearing one table failed; the whole reset was rolled back
    #[error("Failed to clear table {table}: {source}")]
    Reset {
        table: &'static str,
        source: sqlx::Error,
    },
}
