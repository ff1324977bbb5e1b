//! Remediation - point records with missing media at a placeholder copy
//!
//! For every confirmed-missing asset in a report, a copy of the substitute
//! asset is placed at a path derived from the record id and the record is
//! rewritten to reference it. The copy happens inside the repository's guarded
//! rewrite, so a record is never pointed at a file that failed to copy and two
//! concurrent runs cannot both rewrite the same record.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::core::models::{
    AssetRole, Collection, Discrepancy, DiscrepancyReport, RemediationAction, RemediationOutcome,
    RemediationSummary,
};
use crate::core::ports::{
    AssetStorage, ContentRepository, RewriteError, RewriteOutcome, StoreError,
};

const IMAGE_EXTENSIONS: [&str; 7] = ["svg", "png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Replaces missing assets with copies of a substitute
pub struct Remediator<'a> {
    repository: &'a dyn ContentRepository,
    storage: &'a dyn AssetStorage,
    root: PathBuf,
    substitute: PathBuf,
    dry_run: bool,
}

impl std::fmt::Debug for Remediator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Remediator")
            .field("root", &self.root)
            .field("substitute", &self.substitute)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<'a> Remediator<'a> {
    /// Create a remediator
    ///
    /// `substitute` is relative to `root`.
    #[must_use]
    pub fn new(
        repository: &'a dyn ContentRepository,
        storage: &'a dyn AssetStorage,
        root: impl Into<PathBuf>,
        substitute: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repository,
            storage,
            root: root.into(),
            substitute: substitute.into(),
            dry_run: false,
        }
    }

    /// Only plan rewrites; copy and write nothing
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Relative path a record's replacement asset is copied to
    ///
    /// Depends only on the collection, role, record id and the substitute's
    /// extension, so repeated runs reuse the same file.
    #[must_use]
    pub fn replacement_path(
        &self,
        collection: Collection,
        role: AssetRole,
        record_id: i64,
    ) -> String {
        let dir = collection.upload_dir(role).map_or_else(
            || {
                self.substitute
                    .parent()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default()
            },
            str::to_string,
        );
        let suffix = match role {
            AssetRole::Primary => "",
            AssetRole::Thumbnail => "_thumb",
        };
        let extension = self
            .substitute
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let file = format!("sample_{record_id}{suffix}{extension}");

        if dir.is_empty() { file } else { format!("{dir}/{file}") }
    }

    /// Remediate every discrepancy in `report`, in report order
    ///
    /// Copy failures and stale records are reported per entry. Only a store
    /// fault aborts the run.
    pub fn remediate(&self, report: &DiscrepancyReport) -> Result<RemediationSummary, StoreError> {
        let substitute = self.root.join(&self.substitute);
        let substitute_found = match self.storage.exists(&substitute) {
            Ok(true) => Ok(true),
            Ok(false) => {
                warn!("no substitute asset at {}", substitute.display());
                Ok(false)
            },
            Err(e) => {
                warn!("could not check substitute asset: {e}");
                Err(e.to_string())
            },
        };

        let mut summary = RemediationSummary {
            dry_run: self.dry_run,
            ..RemediationSummary::default()
        };

        for discrepancy in &report.discrepancies {
            let action = if discrepancy.state.is_missing() {
                match &substitute_found {
                    Ok(true) => self.fix(report.collection, discrepancy, &substitute)?,
                    Ok(false) => RemediationAction::NoSubstitute,
                    Err(reason) => RemediationAction::SubstituteUnchecked {
                        reason: reason.clone(),
                    },
                }
            } else {
                RemediationAction::SkippedUnknown
            };

            summary.push(RemediationOutcome {
                record_id: discrepancy.record_id,
                title: discrepancy.title.clone(),
                role: discrepancy.role,
                previous_path: discrepancy.recorded_path.clone(),
                action,
            });
        }

        Ok(summary)
    }

    fn fix(
        &self,
        collection: Collection,
        discrepancy: &Discrepancy,
        substitute: &Path,
    ) -> Result<RemediationAction, StoreError> {
        let new_path = self.replacement_path(collection, discrepancy.role, discrepancy.record_id);

        if self.dry_run {
            return Ok(RemediationAction::Planned { new_path });
        }

        let target = self.root.join(&new_path);
        let mut prepare = || self.storage.copy(substitute, &target);

        let outcome = self.repository.rewrite_asset_path(
            collection,
            discrepancy.record_id,
            discrepancy.role,
            &discrepancy.recorded_path,
            &new_path,
            &mut prepare,
        );

        match outcome {
            Ok(RewriteOutcome::Rewritten) => {
                let type_mismatch = self.mismatches(discrepancy.media_type.as_deref());
                if type_mismatch {
                    warn!(
                        "record {} declares media type {:?} but now points at {new_path}",
                        discrepancy.record_id,
                        discrepancy.media_type.as_deref().unwrap_or_default()
                    );
                }
                info!(
                    "record {} {}: {} -> {new_path}",
                    discrepancy.record_id, discrepancy.role, discrepancy.recorded_path
                );
                Ok(RemediationAction::Fixed {
                    new_path,
                    type_mismatch,
                })
            },
            Ok(RewriteOutcome::Stale) => {
                info!("record {} changed since the scan, skipped", discrepancy.record_id);
                Ok(RemediationAction::Stale)
            },
            Err(RewriteError::Prepare(e)) => {
                warn!("record {}: {e}", discrepancy.record_id);
                Ok(RemediationAction::CopyFailed {
                    reason: e.to_string(),
                })
            },
            Err(RewriteError::Store(e)) => Err(e),
        }
    }

    fn mismatches(&self, media_type: Option<&str>) -> bool {
        let substitute_is_image = self
            .substitute
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()));

        match media_type {
            Some(kind) if !kind.is_empty() => substitute_is_image != (kind == "image"),
            _ => false,
        }
    }
}
