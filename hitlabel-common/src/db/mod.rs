//! Storage access: connection handle, schema, models, reset and rules
//!
//! There is no pool. Each API request and the generator's whole run open their
//! own `SqliteConnection` from the same [`Database`] handle.

pub mod init;
pub mod models;
pub mod reset;
pub mod rules;

pub use init::init_schema;
pub use models::*;
pub use reset::reset_all;
pub use rules::{IntegrityRule, SuspendedRule};

use crate::config::DatabaseConfig;
use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection};
use std::path::{Path, PathBuf};
use tracing::info;

/// Connection factory for the label database
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    /// Build a handle from resolved settings. Nothing is opened yet.
    ///
    /// Only [`Database::initialize`] may create the file; `connect` and `ping`
    /// fail when it is missing.
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.busy_timeout);

        Self {
            path: config.path.clone(),
            options,
        }
    }

    /// Database file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection
    pub async fn connect(&self) -> Result<SqliteConnection> {
        Ok(self.options.connect().await?)
    }

    /// Open a connection, round-trip once and close it
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        conn.ping().await?;
        conn.close().await?;
        Ok(())
    }

    /// Create the parent directory and the schema if needed
    pub async fn initialize(&self) -> Result<()> {
        let newly_created = !self.path.exists();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DatabaseDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut conn = self.options.clone().create_if_missing(true).connect().await?;
        init_schema(&mut conn).await?;
        conn.close().await?;

        if newly_created {
            info!("Initialized new database: {}", self.path.display());
        } else {
            info!("Opened existing database: {}", self.path.display());
        }
        Ok(())
    }
}
