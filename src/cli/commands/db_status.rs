//! Show what the site database contains

use brightminds::config::Config;
use brightminds::output::{DbStatusResult, OutputMode};

/// Print version, tables and row counts
pub fn db_status(config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let store = super::open_store(config)?;
    let status = store.status()?;

    DbStatusResult { status }.render(mode);
    Ok(())
}
