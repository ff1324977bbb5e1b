//! Operator configuration
//!
//! Read from `brightminds.toml`. Lookup order: an explicit `--config` path,
//! then `./brightminds.toml`, then `~/.config/brightminds/config.toml`,
//! then built-in defaults. Relative paths in the file resolve against the
//! directory holding it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::adapters::DjangoHasher;
use crate::paths;

/// Configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML or has unknown keys
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Config file
        path: PathBuf,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range
    #[error("invalid config {path}: {message}")]
    Invalid {
        /// Config file
        path: PathBuf,
        /// What is wrong
        message: String,
    },
}

/// Database settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the site's SQLite database
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(paths::DEFAULT_DATABASE),
        }
    }
}

/// Media root settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Storage root for uploaded files
    pub root: PathBuf,
    /// Public URL prefix
    pub url: String,
    /// Placeholder asset used by remediation, relative to `root`
    pub substitute: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(paths::DEFAULT_MEDIA_ROOT),
            url: paths::DEFAULT_MEDIA_URL.to_string(),
            substitute: paths::DEFAULT_SUBSTITUTE.to_string(),
        }
    }
}

/// Login check settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Let inactive accounts resolve (`false` for the strict rule)
    pub allow_inactive: bool,
    /// PBKDF2 rounds for the timing-equalisation hash
    pub hasher_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allow_inactive: true,
            hasher_iterations: DjangoHasher::DEFAULT_ITERATIONS,
        }
    }
}

/// Complete operator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `[database]`
    pub database: DatabaseConfig,
    /// `[media]`
    pub media: MediaConfig,
    /// `[auth]`
    pub auth: AuthConfig,
    /// File this was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load using the standard lookup order
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let local = paths::local_config();
        if local.is_file() {
            return Self::from_file(&local);
        }

        if let Some(global) = paths::global_config().filter(|p| p.is_file()) {
            return Self::from_file(&global);
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load a specific file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content, path)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML as if it were read from `path`
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.auth.hasher_iterations == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "auth.hasher_iterations must be at least 1".to_string(),
            });
        }
        if Path::new(&config.media.substitute).is_absolute() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "media.substitute must be relative to media.root".to_string(),
            });
        }

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.database.path = base.join(&config.database.path);
        config.media.root = base.join(&config.media.root);
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Override the database path (CLI flag or environment)
    #[must_use]
    pub fn with_database(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database.path = path;
        }
        self
    }

    /// Override the media root (CLI flag or environment)
    #[must_use]
    pub fn with_media_root(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root {
            self.media.root = root;
        }
        self
    }

    /// Password verifier configured from `[auth]`
    #[must_use]
    pub const fn hasher(&self) -> DjangoHasher {
        DjangoHasher::new(self.auth.hasher_iterations)
    }
}
