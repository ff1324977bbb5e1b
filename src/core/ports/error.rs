//! Errors raised by port implementations
//!
//! Only infrastructure faults live here. A missing account or a missing file
//! is a normal result and is returned as data, never as one of these.

use std::path::PathBuf;

use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The record store could not answer
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database refused or failed a query
    #[error("database error: {message}")]
    Database {
        /// What was being attempted
        message: String,
        /// Driver error
        #[source]
        source: BoxedSource,
    },

    /// Stored data violates an invariant (duplicate handle, unexpected schema)
    #[error("integrity error: {0}")]
    Integrity(String),

    /// A previous panic left the connection lock poisoned
    #[error("database connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Wrap a driver error with context
    pub fn database(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Box::new(source),
        }
    }
}

/// The storage backend could not complete a filesystem operation
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O failure at a path
    #[error("{action} {path}: {source}")]
    Io {
        /// Operation that failed (e.g. "stat", "copy")
        action: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Wrap an I/O error with the failing action and path
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// A guarded rewrite failed
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The store failed; nothing was committed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The preparation step (copying the substitute) failed; nothing was committed
    #[error(transparent)]
    Prepare(#[from] StorageError),
}
