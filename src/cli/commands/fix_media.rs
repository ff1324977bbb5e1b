//! Point records with missing media at a placeholder copy

use log::info;

use brightminds::adapters::FsStorage;
use brightminds::config::Config;
use brightminds::core::models::Collection;
use brightminds::core::ports::ContentRepository;
use brightminds::core::services::{Reconciler, Remediator};
use brightminds::output::{MediaFixResult, OutputMode};

/// Reconcile a collection, then remediate what is missing
pub fn fix_media(
    config: &Config,
    collection: Collection,
    substitute: Option<String>,
    dry_run: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    super::check_media_root(config)?;
    let store = super::open_store(config)?;
    let records = store.list_all(collection)?;

    let storage = FsStorage::new();
    let report = Reconciler::new(&storage, &config.media.root, collection).reconcile(&records);

    let substitute = substitute.unwrap_or_else(|| config.media.substitute.clone());
    if !report.is_clean() {
        info!("remediating {} discrepancy(ies) with {substitute}", report.discrepancies.len());
    }
    let remediation = Remediator::new(&store, &storage, &config.media.root, substitute)
        .dry_run(dry_run)
        .remediate(&report)?;

    MediaFixResult {
        report,
        remediation,
    }
    .render(mode);
    Ok(())
}
