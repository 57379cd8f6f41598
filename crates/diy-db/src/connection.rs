//! Per-operation connection management.
//!
//! Each record access call opens a fresh connection through
//! [`ConnectionProvider::open`] and drops it before returning. Every new
//! connection enables foreign key enforcement so cascading deletes work.

use diy_common::{Error, Result};
use rusqlite::Connection;

use crate::config::DbConfig;
use crate::migrations;

/// Opens configured SQLite connections on demand.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: DbConfig,
}

impl ConnectionProvider {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    /// Open a new connection to the configured database.
    ///
    /// The connection has foreign keys enabled and the configured busy
    /// timeout applied. It is closed when dropped.
    pub fn open(&self) -> Result<Connection> {
        let path = &self.config.path;
        let conn = Connection::open(path).map_err(|e| {
            tracing::error!("Cannot connect to {}: {}", path.display(), e);
            Error::database(e)
        })?;

        conn.busy_timeout(self.config.busy_timeout())
            .map_err(Error::database)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(Error::database)?;

        tracing::trace!("Opened connection to {}", path.display());
        Ok(conn)
    }
}

/// Prepare the database described by `config` for use.
///
/// This function will:
/// - Create the SQLite database file if it doesn't exist
/// - Run pending schema migrations
///
/// # Returns
///
/// * `Ok(ConnectionProvider)` - Provider for per-operation connections
/// * `Err(Error)` - If the database cannot be opened or migrated
pub fn init_database(config: DbConfig) -> Result<ConnectionProvider> {
    let provider = ConnectionProvider::new(config);
    let conn = provider.open()?;

    let applied = migrations::run_migrations(&conn)?;
    if applied > 0 {
        tracing::info!(
            "Applied {} migration(s) to {}",
            applied,
            provider.config.path.display()
        );
    }

    Ok(provider)
}
