//! Centralized path definitions for brightminds
//!
//! This module provides a single source of truth for every conventional path
//! the site uses: where the database lives, how the media root is laid out,
//! and where configuration is looked up.
//!
//! ## Storage Layout
//!
//! ```text
//! backend/                                 # Site checkout
//! ├── brightminds.toml                     # Optional operator config
//! ├── db.sqlite3                           # Site database
//! └── media/                               # Media root (MEDIA_ROOT)
//!     ├── gallery_media/                   # Gallery item files
//!     │   └── sample_image.svg            # Placeholder used by fix-media
//!     ├── gallery_thumbnails/              # Gallery item thumbnails
//!     ├── avatars/                         # Profile pictures
//!     └── poem_media/                      # Poem attachments
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.config/brightminds/config.toml        # Fallback operator config
//! ```

use std::path::PathBuf;

// =============================================================================
// Site paths
// =============================================================================

/// Default database filename, relative to the config directory
pub const DEFAULT_DATABASE: &str = "db.sqlite3";

/// Default media root, relative to the config directory
pub const DEFAULT_MEDIA_ROOT: &str = "media";

/// Default public URL prefix for media files
pub const DEFAULT_MEDIA_URL: &str = "/media/";

/// Upload directories under the media root
pub const MEDIA_DIRS: [&str; 4] = ["gallery_media", "gallery_thumbnails", "avatars", "poem_media"];

/// Placeholder asset, relative to the media root
pub const DEFAULT_SUBSTITUTE: &str = "gallery_media/sample_image.svg";

/// Marker file that keeps empty upload directories in version control
pub const GITKEEP: &str = ".gitkeep";

/// Probe file used to test write access
pub const PERMISSION_PROBE: &str = ".permissions_test";

// =============================================================================
// Configuration paths
// =============================================================================

/// Project configuration filename
pub const CONFIG_FILE: &str = "brightminds.toml";

/// Global config directory name
const GLOBAL_DIR: &str = "brightminds";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get path to `brightminds.toml` in the current directory.
#[must_use]
pub fn local_config() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

/// Get the global brightminds config directory.
///
/// Returns `~/.config/brightminds/` on Linux (XDG standard).
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(GLOBAL_DIR))
}

/// Get the global config file path.
///
/// Returns `~/.config/brightminds/config.toml` on Linux.
#[must_use]
pub fn global_config() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
}
