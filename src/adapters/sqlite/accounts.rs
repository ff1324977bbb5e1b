//! Account lookups against `auth_user`

use log::debug;
use rusqlite::{Row, params};

use crate::core::models::{Account, AccountField};
use crate::core::ports::{AccountRepository, StoreError};

use super::SqliteStore;

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        handle: row.get(1)?,
        address: row.get(2)?,
        secret_hash: row.get(3)?,
        active: row.get(4)?,
    })
}

impl AccountRepository for SqliteStore {
    fn find_by_field(
        &self,
        field: AccountField,
        value: &str,
    ) -> Result<Option<Account>, StoreError> {
        // A blank address means "no address on file" and must never match.
        if value.is_empty() {
            return Ok(None);
        }

        let conn = self.conn()?;
        let sql = format!(
            "SELECT id, username, email, password, is_active FROM auth_user WHERE {} = ?1 LIMIT 2",
            field.column()
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::database("failed to prepare account lookup", e))?;
        let mut accounts = stmt
            .query_map(params![value], account_from_row)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| StoreError::database(format!("failed to look up account by {field}"), e))?;

        debug!("account lookup by {field}: {} row(s)", accounts.len());

        match accounts.len() {
            0 => Ok(None),
            1 => Ok(accounts.pop()),
            _ => Err(StoreError::Integrity(format!("more than one account shares this {field}"))),
        }
    }
}
