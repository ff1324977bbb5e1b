//! Media listing
//!
//! Walks the media root and lists every file with the URL the site serves
//! it under. Hidden files (`.gitkeep`, probe files) are skipped.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::core::ports::StorageError;

/// One file under the media root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    /// Path relative to the media root, `/`-separated
    pub path: String,
    /// Public URL
    pub url: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time (RFC 3339), when the platform reports one
    pub modified: Option<String>,
}

/// Lists files under a media root
#[derive(Debug, Clone)]
pub struct MediaIndex {
    root: PathBuf,
    media_url: String,
}

impl MediaIndex {
    /// Index `root`, building URLs from `media_url` (e.g. `/media/`)
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, media_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            media_url: media_url.into(),
        }
    }

    /// Public URL for a root-relative path
    #[must_use]
    pub fn url_for(&self, relative: &str) -> String {
        format!("{}/{}", self.media_url.trim_end_matches('/'), relative.trim_start_matches('/'))
    }

    /// Every non-hidden file, sorted by relative path
    pub fn scan(&self) -> Result<Vec<MediaFile>, StorageError> {
        if !self.root.is_dir() {
            return Err(StorageError::io(
                "open",
                &self.root,
                io::Error::new(io::ErrorKind::NotFound, "media root not found"),
            ));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
                StorageError::io("walk", path, io::Error::from(e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let meta = entry
                .metadata()
                .map_err(|e| StorageError::io("stat", entry.path(), io::Error::from(e)))?;
            let relative = relative_path(&self.root, entry.path());
            let modified = meta.modified().ok().map(|t| DateTime::<Utc>::from(t).to_rfc3339());

            files.push(MediaFile {
                url: self.url_for(&relative),
                path: relative,
                size: meta.len(),
                modified,
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}

// The root itself may be a hidden directory (temp dirs often are).
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}
