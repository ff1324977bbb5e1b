//! SQLite adapter for the site database
//!
//! Implements [`AccountRepository`](crate::core::ports::AccountRepository) and
//! [`ContentRepository`](crate::core::ports::ContentRepository) against the
//! tables the web backend creates (`auth_user`, `api_galleryitem`,
//! `api_poem`, `api_userprofile`).
//!
//! - [`accounts`] - Account lookups
//! - [`content`] - Content listing and guarded path rewrites

pub mod accounts;
pub mod content;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use rusqlite::{Connection, OpenFlags};
use serde::Serialize;

use crate::core::models::Collection;
use crate::core::ports::StoreError;

/// How long a write waits for another writer before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Tables counted by [`SqliteStore::status`]
const COUNTED_TABLES: [&str; 1] = ["auth_user"];

/// Connection to the site database
///
/// The connection sits behind a mutex so one store can be shared; writes
/// additionally take SQLite's write lock so other processes are serialized
/// too.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

/// Summary of what the database contains
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    /// Database file, if not in-memory
    pub path: Option<PathBuf>,
    /// SQLite library version
    pub sqlite_version: String,
    /// Every table, sorted by name
    pub tables: Vec<String>,
    /// Row counts for the tables this tool reads, when present
    pub counts: BTreeMap<String, i64>,
}

impl SqliteStore {
    /// Open an existing database file
    ///
    /// The file is never created: a missing database is a configuration
    /// error, not an empty site.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            StoreError::database(format!("failed to open database {}", path.display()), e)
        })?;
        debug!("opened database {}", path.display());

        let mut store = Self::from_connection(conn)?;
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    /// Wrap an already open connection (e.g. in-memory for tests)
    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| StoreError::database("failed to set busy timeout", e))?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file this store was opened from
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Report version, tables and row counts
    pub fn status(&self) -> Result<DatabaseStatus, StoreError> {
        let conn = self.conn()?;

        let sqlite_version: String = conn
            .query_row("SELECT sqlite_version()", [], |row| row.get(0))
            .map_err(|e| StoreError::database("failed to query sqlite version", e))?;

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .map_err(|e| StoreError::database("failed to list tables", e))?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| StoreError::database("failed to list tables", e))?;

        let counted = COUNTED_TABLES
            .into_iter()
            .chain(Collection::ALL.into_iter().map(Collection::table));

        let mut counts = BTreeMap::new();
        for table in counted {
            if !tables.iter().any(|t| t == table) {
                continue;
            }
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
                .map_err(|e| StoreError::database(format!("failed to count {table}"), e))?;
            counts.insert(table.to_string(), count);
        }

        Ok(DatabaseStatus {
            path: self.path.clone(),
            sqlite_version,
            tables,
            counts,
        })
    }
}
