//! Account repository port
//!
//! Defines the lookup the login check needs from the account store.

use crate::core::models::{Account, AccountField};

use super::StoreError;

/// Read access to site accounts
///
/// Implementations match `value` exactly (case-sensitive, no trimming).
#[cfg_attr(test, mockall::automock)]
pub trait AccountRepository: Send + Sync {
    /// Find the account whose `field` equals `value`
    ///
    /// Returns `Ok(None)` when nothing matches. More than one match breaks the
    /// uniqueness invariant and is reported as [`StoreError::Integrity`].
    fn find_by_field(&self, field: AccountField, value: &str)
    -> Result<Option<Account>, StoreError>;
}
