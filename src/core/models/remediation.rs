//! Remediation outcomes

use serde::Serialize;

use super::AssetRole;

/// What remediation did for one discrepancy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RemediationAction {
    /// Substitute copied and record rewritten
    Fixed {
        /// New relative path stored on the record
        new_path: String,
        /// The substitute's kind differs from the record's media type
        type_mismatch: bool,
    },
    /// Dry run: this rewrite would happen
    Planned {
        /// Relative path the record would be pointed at
        new_path: String,
    },
    /// No substitute asset to copy from
    NoSubstitute,
    /// Whether the substitute exists could not be determined
    SubstituteUnchecked {
        /// Why the check failed
        reason: String,
    },
    /// Copy failed; record left untouched
    CopyFailed {
        /// Underlying error
        reason: String,
    },
    /// The record's path changed since the scan; nothing written
    Stale,
    /// Presence was unknown, so the record was not touched
    SkippedUnknown,
}

/// Remediation result for one discrepancy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationOutcome {
    /// Record primary key
    pub record_id: i64,
    /// Record title for display
    pub title: String,
    /// Asset field that was missing
    pub role: AssetRole,
    /// Path the record pointed at before remediation
    pub previous_path: String,
    /// What happened
    #[serde(flatten)]
    pub action: RemediationAction,
}

/// Result of a remediation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemediationSummary {
    /// Whether anything was written
    pub dry_run: bool,
    /// Discrepancies considered
    pub considered: usize,
    /// Records rewritten (or planned, in a dry run)
    pub fixed: usize,
    /// Copy failures
    pub failed: usize,
    /// Skipped (no substitute, stale, unknown)
    pub skipped: usize,
    /// Per-discrepancy outcomes, in report order
    pub outcomes: Vec<RemediationOutcome>,
}

impl RemediationSummary {
    /// Record an outcome and update the counters
    pub fn push(&mut self, outcome: RemediationOutcome) {
        self.considered += 1;
        match outcome.action {
            RemediationAction::Fixed { .. } | RemediationAction::Planned { .. } => self.fixed += 1,
            RemediationAction::CopyFailed { .. } => self.failed += 1,
            RemediationAction::NoSubstitute
            | RemediationAction::SubstituteUnchecked { .. }
            | RemediationAction::Stale
            | RemediationAction::SkippedUnknown => self.skipped += 1,
        }
        self.outcomes.push(outcome);
    }
}
