//! Report records whose media files are missing

use brightminds::adapters::FsStorage;
use brightminds::config::Config;
use brightminds::core::models::{AssetRole, Collection};
use brightminds::core::ports::ContentRepository;
use brightminds::core::services::Reconciler;
use brightminds::output::{MediaCheckResult, OutputMode};

/// Reconcile one collection against the media root and print the report
pub fn check_media(
    config: &Config,
    collection: Collection,
    role: Option<AssetRole>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    super::check_media_root(config)?;
    let store = super::open_store(config)?;
    let records = store.list_all(collection)?;

    let storage = FsStorage::new();
    let mut reconciler = Reconciler::new(&storage, &config.media.root, collection);
    if let Some(role) = role {
        reconciler = reconciler.with_roles(&[role]);
    }

    let report = reconciler.reconcile(&records);
    MediaCheckResult { report }.render(mode);
    Ok(())
}
