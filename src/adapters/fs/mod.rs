//! Local filesystem adapter for the media root
//!
//! - [`FsStorage`] - `AssetStorage` on the local disk
//! - [`layout`] - Create and check the conventional upload directories
//! - [`index`] - List every file under the media root

pub mod index;
pub mod layout;

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::core::ports::{AssetStorage, StorageError};

pub use index::{MediaFile, MediaIndex};
pub use layout::{DirectorySetup, MediaLayout, PlaceholderStatus, SetupReport};

/// Media storage on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    /// Create a filesystem storage backend
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AssetStorage for FsStorage {
    fn exists(&self, path: &Path) -> Result<bool, StorageError> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                Ok(false)
            },
            Err(e) => Err(StorageError::io("stat", path, e)),
        }
    }

    fn ensure_directory(&self, path: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(path).map_err(|e| StorageError::io("create directory", path, e))
    }

    fn copy(&self, src: &Path, dst: &Path) -> Result<(), StorageError> {
        let parent = dst.parent().unwrap_or_else(|| Path::new("."));
        self.ensure_directory(parent)?;

        let mut source = fs::File::open(src).map_err(|e| StorageError::io("open", src, e))?;
        let mut staged = NamedTempFile::new_in(parent)
            .map_err(|e| StorageError::io("create temp file in", parent, e))?;
        io::copy(&mut source, &mut staged).map_err(|e| StorageError::io("copy", src, e))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|e| StorageError::io("sync", staged.path().to_path_buf(), e))?;
        staged.persist(dst).map_err(|e| StorageError::io("rename into", dst, e.error))?;

        debug!("copied {} -> {}", src.display(), dst.display());
        Ok(())
    }
}
