//! Content repository port
//!
//! Defines access to the rows that reference uploaded media.

use crate::core::models::{AssetRole, Collection, ContentRecord};

use super::{RewriteError, StorageError, StoreError};

/// Outcome of a guarded asset-path rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The path was rewritten and committed
    Rewritten,
    /// The stored path no longer matched the expected value; nothing changed
    Stale,
}

/// Access to content records
pub trait ContentRepository: Send + Sync {
    /// All records of `collection`, ordered by primary key
    fn list_all(&self, collection: Collection) -> Result<Vec<ContentRecord>, StoreError>;

    /// Point one asset field of one record at `replacement`
    ///
    /// The implementation must hold a per-record write lock for the whole
    /// call. Under that lock it re-reads the field; if it still equals
    /// `expected` it runs `prepare` (which copies the replacement file into
    /// place) and only after `prepare` succeeds writes `replacement` and
    /// commits. If `prepare` fails nothing is written.
    fn rewrite_asset_path(
        &self,
        collection: Collection,
        record_id: i64,
        role: AssetRole,
        expected: &str,
        replacement: &str,
        prepare: &mut dyn FnMut() -> Result<(), StorageError>,
    ) -> Result<RewriteOutcome, RewriteError>;
}
