//! Media reconciliation - which recorded asset paths are really on disk
//!
//! The reconciler walks a list of content records once, resolves every
//! non-empty asset path against the storage root and asks the storage backend
//! whether the file is there. Anything not confirmed present ends up in the
//! report: confirmed absences as `missing`, failed checks as `unknown`.

use std::path::{Component, Path, PathBuf};

use log::{debug, warn};

use crate::core::models::{
    AssetRole, AssetState, Collection, ContentRecord, Discrepancy, DiscrepancyReport,
};
use crate::core::ports::AssetStorage;

/// Checks asset references of one collection against a storage root
pub struct Reconciler<'a> {
    storage: &'a dyn AssetStorage,
    root: PathBuf,
    collection: Collection,
    roles: Vec<AssetRole>,
}

impl std::fmt::Debug for Reconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("root", &self.root)
            .field("collection", &self.collection)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler checking every role `collection` stores
    #[must_use]
    pub fn new(
        storage: &'a dyn AssetStorage,
        root: impl Into<PathBuf>,
        collection: Collection,
    ) -> Self {
        Self {
            storage,
            root: root.into(),
            collection,
            roles: collection.roles(),
        }
    }

    /// Restrict the check to `roles`
    ///
    /// Reporting order is always primary before thumbnail regardless of the
    /// order given here.
    #[must_use]
    pub fn with_roles(mut self, roles: &[AssetRole]) -> Self {
        self.roles = AssetRole::ALL.into_iter().filter(|role| roles.contains(role)).collect();
        self
    }

    /// Storage root paths are resolved against
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collection being checked
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }

    /// Make sure the collection's upload directories exist
    ///
    /// Failures are logged and otherwise ignored: the check itself does not
    /// depend on the directories.
    pub fn ensure_directories(&self) {
        for dir in self.collection.upload_dirs() {
            let path = self.root.join(dir);
            if let Err(e) = self.storage.ensure_directory(&path) {
                warn!("could not create media directory: {e}");
            }
        }
    }

    /// Check every record and collect discrepancies in input order
    #[must_use]
    pub fn reconcile(&self, records: &[ContentRecord]) -> DiscrepancyReport {
        self.ensure_directories();

        let mut report = DiscrepancyReport::new(self.collection, self.root.clone());

        for record in records {
            report.records_scanned += 1;

            for role in &self.roles {
                let Some(recorded) = record.asset(*role) else {
                    continue;
                };
                report.assets_checked += 1;

                let resolved = self.root.join(recorded);
                let state = if escapes_root(recorded) {
                    warn!("record {} {role}: {recorded} points outside the media root", record.id);
                    AssetState::Unknown {
                        reason: "path points outside the media root".to_string(),
                    }
                } else {
                    match self.storage.exists(&resolved) {
                        Ok(true) => {
                            debug!("record {} {role}: {} present", record.id, resolved.display());
                            continue;
                        },
                        Ok(false) => AssetState::Missing,
                        Err(e) => {
                            warn!("record {} {role}: could not check {recorded}: {e}", record.id);
                            AssetState::Unknown {
                                reason: e.to_string(),
                            }
                        },
                    }
                };

                report.push(Discrepancy {
                    record_id: record.id,
                    title: record.display_title().to_string(),
                    role: *role,
                    recorded_path: recorded.to_string(),
                    resolved_path: resolved,
                    state,
                    media_type: record.media_type.clone(),
                });
            }
        }

        report
    }
}

// Absolute paths and `..` would make the check look outside the root.
fn escapes_root(recorded: &str) -> bool {
    Path::new(recorded)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
}
