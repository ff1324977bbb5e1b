//! Media directory bootstrap
//!
//! Creates the upload directories the site expects, checks they are
//! writable, drops a `.gitkeep` into each and makes sure the placeholder
//! asset used by remediation exists. Every step is reported instead of
//! aborting on the first failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use crate::paths::{GITKEEP, MEDIA_DIRS, PERMISSION_PROBE};

/// Placeholder written when the substitute asset is missing
pub const PLACEHOLDER_SVG: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="400" height="200" viewBox="0 0 400 200" xmlns="http://www.w3.org/2000/svg">
  <rect width="100%" height="100%" fill="#f0f0f0"/>
  <text x="50%" y="50%" font-family="Arial" font-size="24" text-anchor="middle" dominant-baseline="middle" fill="#666">
    Sample Gallery Image
  </text>
  <line x1="50" y1="100" x2="350" y2="100" stroke="#999" stroke-width="2"/>
  <text x="200" y="140" font-family="Arial" font-size="14" text-anchor="middle" fill="#999">
    400 × 200
  </text>
</svg>
"##;

/// Setup result for one directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySetup {
    /// Directory relative to the media root (`.` for the root itself)
    pub path: String,
    /// Whether this run created it
    pub created: bool,
    /// Whether a probe file could be written and removed
    pub writable: bool,
    /// Whether a `.gitkeep` is present after this run
    pub gitkeep: bool,
    /// First error hit, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What happened to the placeholder asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlaceholderStatus {
    /// Already there, left alone
    Present,
    /// Written by this run
    Created,
    /// Could not be written
    Failed {
        /// Underlying error
        reason: String,
    },
}

/// Result of a bootstrap run
#[derive(Debug, Clone, Serialize)]
pub struct SetupReport {
    /// Media root
    pub root: PathBuf,
    /// Root first, then each upload directory
    pub directories: Vec<DirectorySetup>,
    /// Placeholder path relative to the root
    pub placeholder_path: String,
    /// Placeholder outcome
    pub placeholder: PlaceholderStatus,
}

impl SetupReport {
    /// True when every directory is present and writable and the placeholder exists
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.directories.iter().all(|d| d.writable && d.error.is_none())
            && !matches!(self.placeholder, PlaceholderStatus::Failed { .. })
    }
}

/// Conventional layout of the media root
#[derive(Debug, Clone)]
pub struct MediaLayout {
    root: PathBuf,
    placeholder: PathBuf,
}

impl MediaLayout {
    /// Layout rooted at `root` with the placeholder at `placeholder` (relative)
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, placeholder: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Create directories, probe permissions, add `.gitkeep` files and the placeholder
    #[must_use]
    pub fn bootstrap(&self) -> SetupReport {
        let mut directories = vec![prepare_directory(&self.root, ".", false)];
        for dir in MEDIA_DIRS {
            directories.push(prepare_directory(&self.root.join(dir), dir, true));
        }

        SetupReport {
            root: self.root.clone(),
            directories,
            placeholder_path: self.placeholder.to_string_lossy().replace('\\', "/"),
            placeholder: self.write_placeholder(),
        }
    }

    fn write_placeholder(&self) -> PlaceholderStatus {
        let path = self.root.join(&self.placeholder);
        if path.is_file() {
            return PlaceholderStatus::Present;
        }

        let written = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&path, PLACEHOLDER_SVG));

        match written {
            Ok(()) => {
                debug!("wrote placeholder {}", path.display());
                PlaceholderStatus::Created
            },
            Err(e) => {
                warn!("could not write placeholder {}: {e}", path.display());
                PlaceholderStatus::Failed {
                    reason: e.to_string(),
                }
            },
        }
    }
}

fn prepare_directory(path: &Path, label: &str, with_gitkeep: bool) -> DirectorySetup {
    let existed = path.is_dir();
    let mut setup = DirectorySetup {
        path: label.to_string(),
        created: false,
        writable: false,
        gitkeep: false,
        error: None,
    };

    if let Err(e) = fs::create_dir_all(path) {
        warn!("could not create {}: {e}", path.display());
        setup.error = Some(e.to_string());
        return setup;
    }
    setup.created = !existed;

    match probe_writable(path) {
        Ok(()) => setup.writable = true,
        Err(e) => {
            warn!("{} is not writable: {e}", path.display());
            setup.error = Some(e.to_string());
        },
    }

    if with_gitkeep {
        let marker = path.join(GITKEEP);
        setup.gitkeep = marker.exists() || fs::write(&marker, "").is_ok();
    }

    setup
}

fn probe_writable(dir: &Path) -> io::Result<()> {
    let probe = dir.join(PERMISSION_PROBE);
    fs::write(&probe, "test")?;
    fs::remove_file(&probe)
}
