//! List records and the media paths they store

use brightminds::config::Config;
use brightminds::core::models::Collection;
use brightminds::core::ports::ContentRepository;
use brightminds::output::{ItemListResult, OutputMode};

/// List every record of a collection
pub fn list_items(config: &Config, collection: Collection, mode: OutputMode) -> anyhow::Result<()> {
    let store = super::open_store(config)?;
    let items = store.list_all(collection)?;

    ItemListResult { collection, items }.render(mode);
    Ok(())
}
