//! SQLite connection management for linkdeck.
//!
//! [`Database::open`] creates the data directory if needed, sets a busy
//! timeout so two clients sharing one session file wait instead of failing,
//! and brings the schema up to date.

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

use super::migrations;
use crate::types::errors::DatabaseError;

/// How long a write waits on another process holding the session file.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Owns the session database connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the session database at `path`, creating missing
    /// parent directories first.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Directory {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::prepare(conn)
    }

    /// In-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
