//! Command implementations

mod check_media;
mod db_status;
mod fix_media;
mod list_items;
mod list_media;
mod login;
mod setup_media;

pub use check_media::check_media;
pub use db_status::db_status;
pub use fix_media::fix_media;
pub use list_items::list_items;
pub use list_media::list_media;
pub use login::login;
pub use setup_media::setup_media;

use anyhow::Context;
use brightminds::adapters::SqliteStore;
use brightminds::config::Config;

/// Open the configured site database
fn open_store(config: &Config) -> anyhow::Result<SqliteStore> {
    SqliteStore::open(&config.database.path).with_context(|| {
        format!(
            "cannot open the site database at {} (set --database or [database] path)",
            config.database.path.display()
        )
    })
}

/// Fail when the media root exists but cannot hold media
fn check_media_root(config: &Config) -> anyhow::Result<()> {
    let root = &config.media.root;
    if root.exists() && !root.is_dir() {
        anyhow::bail!("media root {} is not a directory", root.display());
    }
    Ok(())
}
