//! Domain models for brightminds
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Account`] - A site member who can log in
//! - [`ContentRecord`] - A database row that references uploaded media
//! - [`Collection`] - Which content table a record came from
//! - [`DiscrepancyReport`] - Result of one reconciliation run
//! - [`RemediationSummary`] - Result of one remediation run

mod account;
mod content;
mod remediation;
mod report;

pub use account::{Account, AccountField};
pub use content::{AssetRole, Collection, ContentRecord};
pub use remediation::{RemediationAction, RemediationOutcome, RemediationSummary};
pub use report::{AssetState, Discrepancy, DiscrepancyReport};
