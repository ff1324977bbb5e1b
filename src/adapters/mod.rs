//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `sqlite/` - The site database (accounts and content tables)
//! - `fs/` - The media root on the local filesystem
//! - `hasher` - Django-compatible password verification

pub mod fs;
pub mod hasher;
pub mod sqlite;

pub use fs::{FsStorage, MediaFile, MediaIndex, MediaLayout, PlaceholderStatus, SetupReport};
pub use hasher::DjangoHasher;
pub use sqlite::{DatabaseStatus, SqliteStore};
