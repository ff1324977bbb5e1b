//! Content listing and guarded asset-path rewrites

use log::debug;
use rusqlite::{OptionalExtension, Row, TransactionBehavior, params};

use crate::core::models::{AssetRole, Collection, ContentRecord};
use crate::core::ports::{
    ContentRepository, RewriteError, RewriteOutcome, StorageError, StoreError,
};

use super::SqliteStore;

/// Timestamp format the web backend writes into SQLite datetime columns
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

fn select_sql(collection: Collection) -> &'static str {
    match collection {
        Collection::Gallery => {
            "SELECT id, title, media_file, thumbnail, media_type FROM api_galleryitem ORDER BY id"
        },
        Collection::Poems => {
            "SELECT id, title, media_file, NULL, media_type FROM api_poem ORDER BY id"
        },
        Collection::Avatars => {
            "SELECT p.id, u.username, p.avatar, NULL, NULL \
             FROM api_userprofile p JOIN auth_user u ON u.id = p.user_id ORDER BY p.id"
        },
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ContentRecord> {
    Ok(ContentRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        primary: row.get(2)?,
        thumbnail: row.get(3)?,
        media_type: row.get(4)?,
    })
}

impl ContentRepository for SqliteStore {
    fn list_all(&self, collection: Collection) -> Result<Vec<ContentRecord>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(select_sql(collection))
            .map_err(|e| StoreError::database(format!("failed to query {collection}"), e))?;
        let records = stmt
            .query_map([], record_from_row)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| StoreError::database(format!("failed to read {collection}"), e))?;

        debug!("loaded {} {collection} record(s)", records.len());
        Ok(records)
    }

    fn rewrite_asset_path(
        &self,
        collection: Collection,
        record_id: i64,
        role: AssetRole,
        expected: &str,
        replacement: &str,
        prepare: &mut dyn FnMut() -> Result<(), StorageError>,
    ) -> Result<RewriteOutcome, RewriteError> {
        let Some(column) = collection.column(role) else {
            return Err(StoreError::Integrity(format!("{collection} has no {role} field")).into());
        };
        let table = collection.table();

        let mut conn = self.conn()?;
        // IMMEDIATE takes the write lock up front, so no other writer can slip
        // in between the re-read and the update.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| StoreError::database("failed to begin rewrite", e))?;

        let select = format!("SELECT {column} FROM {table} WHERE id = ?1");
        let current: Option<Option<String>> = tx
            .query_row(&select, params![record_id], |row| row.get(0))
            .optional()
            .map_err(|e| {
                StoreError::database(format!("failed to re-read {table} {record_id}"), e)
            })?;

        if current.flatten().as_deref() != Some(expected) {
            debug!("{table} {record_id} {column} changed since the scan");
            return Ok(RewriteOutcome::Stale);
        }

        prepare()?;

        let updated = if collection == Collection::Gallery {
            let now = chrono::Utc::now().format(DATETIME_FORMAT).to_string();
            tx.execute(
                &format!("UPDATE {table} SET {column} = ?1, updated_at = ?2 WHERE id = ?3"),
                params![replacement, now, record_id],
            )
        } else {
            tx.execute(
                &format!("UPDATE {table} SET {column} = ?1 WHERE id = ?2"),
                params![replacement, record_id],
            )
        }
        .map_err(|e| StoreError::database(format!("failed to update {table} {record_id}"), e))?;

        if updated != 1 {
            return Err(StoreError::Integrity(format!(
                "rewrite of {table} {record_id} touched {updated} row(s)"
            ))
            .into());
        }

        tx.commit().map_err(|e| StoreError::database("failed to commit rewrite", e))?;
        Ok(RewriteOutcome::Rewritten)
    }
}
