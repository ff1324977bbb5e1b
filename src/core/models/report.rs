//! Discrepancy report
//!
//! Produced once per reconciliation run and thrown away after it has been
//! printed. Nothing here is persisted.

use std::path::PathBuf;

use serde::Serialize;

use super::{AssetRole, Collection};

/// What a reconciliation check concluded about one referenced asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AssetState {
    /// The storage backend confirmed the file is absent
    Missing,
    /// The check itself failed, so presence is unknown
    Unknown {
        /// Why the check was inconclusive
        reason: String,
    },
}

impl AssetState {
    /// True for a confirmed absence
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl std::fmt::Display for AssetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Unknown { reason } => write!(f, "unknown ({reason})"),
        }
    }
}

/// One asset reference that could not be confirmed present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    /// Record primary key
    pub record_id: i64,
    /// Record title for display
    pub title: String,
    /// Which asset field the path came from
    pub role: AssetRole,
    /// Path as stored on the record
    pub recorded_path: String,
    /// Storage root joined with the recorded path
    pub resolved_path: PathBuf,
    /// Missing or unknown
    #[serde(flatten)]
    pub state: AssetState,
    /// Declared media type of the record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// Result of a reconciliation run, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscrepancyReport {
    /// Collection that was scanned
    pub collection: Collection,
    /// Storage root the paths were resolved against
    pub storage_root: PathBuf,
    /// Number of records visited
    pub records_scanned: usize,
    /// Number of non-empty asset references checked
    pub assets_checked: usize,
    /// Confirmed-missing primary assets
    pub missing_primary: usize,
    /// Confirmed-missing thumbnails
    pub missing_thumbnail: usize,
    /// Inconclusive primary checks
    pub unknown_primary: usize,
    /// Inconclusive thumbnail checks
    pub unknown_thumbnail: usize,
    /// Inconclusive checks across roles
    pub unknown: usize,
    /// Every unconfirmed reference
    pub discrepancies: Vec<Discrepancy>,
}

impl DiscrepancyReport {
    /// Empty report for a scan of `collection` under `storage_root`
    #[must_use]
    pub const fn new(collection: Collection, storage_root: PathBuf) -> Self {
        Self {
            collection,
            storage_root,
            records_scanned: 0,
            assets_checked: 0,
            missing_primary: 0,
            missing_thumbnail: 0,
            unknown_primary: 0,
            unknown_thumbnail: 0,
            unknown: 0,
            discrepancies: Vec::new(),
        }
    }

    /// Append a discrepancy and update the counters
    pub fn push(&mut self, discrepancy: Discrepancy) {
        match (&discrepancy.state, discrepancy.role) {
            (AssetState::Missing, AssetRole::Primary) => self.missing_primary += 1,
            (AssetState::Missing, AssetRole::Thumbnail) => self.missing_thumbnail += 1,
            (AssetState::Unknown { .. }, AssetRole::Primary) => self.unknown_primary += 1,
            (AssetState::Unknown { .. }, AssetRole::Thumbnail) => self.unknown_thumbnail += 1,
        }
        if !discrepancy.state.is_missing() {
            self.unknown += 1;
        }
        self.discrepancies.push(discrepancy);
    }

    /// Discrepancies of either state for one role
    #[must_use]
    pub const fn for_role(&self, role: AssetRole) -> usize {
        match role {
            AssetRole::Primary => self.missing_primary + self.unknown_primary,
            AssetRole::Thumbnail => self.missing_thumbnail + self.unknown_thumbnail,
        }
    }

    /// Confirmed-missing assets across roles
    #[must_use]
    pub const fn missing(&self) -> usize {
        self.missing_primary + self.missing_thumbnail
    }

    /// True when every reference was confirmed present
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Discrepancies for one record, primary first
    pub fn for_record(&self, record_id: i64) -> impl Iterator<Item = &Discrepancy> {
        self.discrepancies.iter().filter(move |d| d.record_id == record_id)
    }
}
