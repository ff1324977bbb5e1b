//! Asset storage port
//!
//! Defines the filesystem operations the reconciler and remediation need.

use std::path::Path;

use super::StorageError;

/// Storage backend holding uploaded media
#[cfg_attr(test, mockall::automock)]
pub trait AssetStorage: Send + Sync {
    /// Whether a file exists at `path`
    ///
    /// An `Err` means the check was inconclusive (permission denied, I/O
    /// fault), which is different from `Ok(false)`.
    fn exists(&self, path: &Path) -> Result<bool, StorageError>;

    /// Create `path` and any missing parents
    fn ensure_directory(&self, path: &Path) -> Result<(), StorageError>;

    /// Copy `src` to `dst`, creating parent directories
    ///
    /// Once this returns `Ok`, `dst` is complete; a reader never sees a
    /// partially written file.
    fn copy(&self, src: &Path, dst: &Path) -> Result<(), StorageError>;
}
