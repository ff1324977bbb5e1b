//! Output formatting for human and JSON modes
//!
//! Every command builds one of the result types below and renders it either
//! as line-oriented text or as pretty JSON. Log lines go to stderr, so the
//! JSON on stdout stays parseable.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::adapters::{DatabaseStatus, MediaFile, PlaceholderStatus, SetupReport};
use crate::core::models::{
    Account, AssetRole, AssetState, Collection, ContentRecord, DiscrepancyReport, RemediationAction,
    RemediationSummary,
};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Result of `check-media`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct MediaCheckResult {
    /// The reconciliation report
    pub report: DiscrepancyReport,
}

impl MediaCheckResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        print_report(&self.report);

        if self.report.is_clean() {
            println!("\n{}", "All referenced media files are present.".green());
            return;
        }

        println!("\nTo fix:");
        if self.report.missing() > 0 {
            println!("  - upload the missing files to the expected paths above, or");
            println!(
                "  - run 'brightminds fix-media --collection {}' to point the records at a placeholder",
                self.report.collection
            );
        }
        if self.report.unknown > 0 {
            println!(
                "  - check permissions on the media root; unknown entries are never rewritten"
            );
        }
    }
}

fn print_report(report: &DiscrepancyReport) {
    println!("Checking {} media under {}\n", report.collection, report.storage_root.display());
    println!("  Records scanned:    {}", report.records_scanned);
    println!("  Assets checked:     {}", report.assets_checked);
    println!("  Missing primary:    {}", report.missing_primary);
    println!("  Missing thumbnail:  {}", report.missing_thumbnail);
    println!("  Unknown primary:    {}", report.unknown_primary);
    println!("  Unknown thumbnail:  {}", report.unknown_thumbnail);
    println!(
        "  By role:            {} primary, {} thumbnail",
        report.for_role(AssetRole::Primary),
        report.for_role(AssetRole::Thumbnail)
    );

    if report.is_clean() {
        return;
    }

    println!("\n{} discrepancy(ies):\n", report.discrepancies.len());
    for (index, d) in report.discrepancies.iter().enumerate() {
        let state = match &d.state {
            AssetState::Missing => "MISSING".red().to_string(),
            AssetState::Unknown { .. } => "UNKNOWN".yellow().to_string(),
        };
        println!("{:>3}. [{state}] #{} {} ({})", index + 1, d.record_id, d.title, d.role);
        println!("       recorded: {}", d.recorded_path);
        println!("       expected: {}", d.resolved_path.display());
        if let AssetState::Unknown { reason } = &d.state {
            println!("       reason:   {reason}");
        }
    }
}

/// Result of `fix-media`
#[derive(Debug, Serialize)]
pub struct MediaFixResult {
    /// What the scan found
    pub report: DiscrepancyReport,
    /// What remediation did about it
    pub remediation: RemediationSummary,
}

impl MediaFixResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        print_report(&self.report);

        let summary = &self.remediation;
        if summary.outcomes.is_empty() {
            println!("\n{}", "Nothing to fix.".green());
            return;
        }

        println!();
        for outcome in &summary.outcomes {
            let line = match &outcome.action {
                RemediationAction::Fixed {
                    new_path,
                    type_mismatch,
                } => {
                    let note = if *type_mismatch { " (media type mismatch)" } else { "" };
                    format!("{} -> {new_path}{note}", "fixed".green())
                },
                RemediationAction::Planned { new_path } => {
                    format!("{} -> {new_path}", "would fix".cyan())
                },
                RemediationAction::NoSubstitute => {
                    format!("{}: no substitute asset", "skipped".yellow())
                },
                RemediationAction::SubstituteUnchecked { reason } => {
                    format!("{}: could not check substitute asset: {reason}", "skipped".yellow())
                },
                RemediationAction::CopyFailed { reason } => {
                    format!("{}: {reason}", "copy failed".red())
                },
                RemediationAction::Stale => {
                    format!("{}: record changed since the scan", "skipped".yellow())
                },
                RemediationAction::SkippedUnknown => {
                    format!("{}: asset state unknown", "skipped".yellow())
                },
            };
            println!(
                "  #{} {} ({}) {}: {line}",
                outcome.record_id, outcome.title, outcome.role, outcome.previous_path
            );
        }

        let verb = if summary.dry_run { "Would fix" } else { "Fixed" };
        println!(
            "\n{verb} {}, failed {}, skipped {} of {} discrepancy(ies).",
            summary.fixed, summary.failed, summary.skipped, summary.considered
        );
        if summary.dry_run {
            println!("Dry run: nothing was copied or written.");
        }
    }
}

/// Result of `login`
#[derive(Debug, Serialize)]
pub struct LoginResult {
    /// Identifier as given
    pub identifier: String,
    /// Whether the identifier and secret resolved to an account
    pub authenticated: bool,
    /// The resolved account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
}

impl LoginResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => match &self.account {
                Some(account) => println!(
                    "{} as {} <{}> (id {})",
                    "Authenticated".green(),
                    account.handle,
                    account.address,
                    account.id
                ),
                None => println!("{} for {}", "Authentication failed".red(), self.identifier),
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Result of `setup-media`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SetupResult {
    /// Bootstrap report
    pub report: SetupReport,
}

impl SetupResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!("Setting up media under {}\n", self.report.root.display());
        for dir in &self.report.directories {
            let state = if dir.error.is_some() {
                "failed".red().to_string()
            } else if dir.created {
                "created".green().to_string()
            } else {
                "present".to_string()
            };
            let writable = if dir.writable { "writable" } else { "not writable" };
            println!("  {:<20} {state}, {writable}", dir.path);
            if let Some(error) = &dir.error {
                println!("  {:<20} {error}", "");
            }
        }

        let placeholder = match &self.report.placeholder {
            PlaceholderStatus::Present => "present".to_string(),
            PlaceholderStatus::Created => "created".green().to_string(),
            PlaceholderStatus::Failed { reason } => format!("{}: {reason}", "failed".red()),
        };
        println!("\n  Placeholder {}: {placeholder}", self.report.placeholder_path);

        if self.report.is_ready() {
            println!("\n{}", "Media directories are ready.".green());
        } else {
            println!("\n{}", "Media setup incomplete, see above.".yellow());
        }
    }
}

/// Result of `list-items`
#[derive(Debug, Serialize)]
pub struct ItemListResult {
    /// Collection listed
    pub collection: Collection,
    /// Records in id order
    pub items: Vec<ContentRecord>,
}

impl ItemListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.items.is_empty() {
            println!("No {} records found.", self.collection);
            return;
        }

        println!("{} {} record(s):\n", self.items.len(), self.collection);
        for item in &self.items {
            match &item.media_type {
                Some(media_type) => {
                    println!("  #{} {} [{media_type}]", item.id, item.display_title());
                },
                None => println!("  #{} {}", item.id, item.display_title()),
            }
            println!("      media:     {}", item.primary.as_deref().unwrap_or("-"));
            if self.collection == Collection::Gallery {
                println!("      thumbnail: {}", item.thumbnail.as_deref().unwrap_or("-"));
            }
        }
    }
}

/// Result of `list-media`
#[derive(Debug, Serialize)]
pub struct MediaListResult {
    /// Media root
    pub root: PathBuf,
    /// Files sorted by path
    pub files: Vec<MediaFile>,
}

impl MediaListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.files.is_empty() {
            println!("No media files under {}.", self.root.display());
            return;
        }

        println!("{} file(s) under {}:\n", self.files.len(), self.root.display());
        for file in &self.files {
            println!("  {:<48} {:>10}  {}", file.path, file.size, file.url);
        }
    }
}

/// Result of `db-status`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DbStatusResult {
    /// Database status
    pub status: DatabaseStatus,
}

impl DbStatusResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let status = &self.status;
        match &status.path {
            Some(path) => println!("Database: {}", path.display()),
            None => println!("Database: (in memory)"),
        }
        println!("SQLite:   {}", status.sqlite_version);
        println!("Tables:   {}", status.tables.len());
        for (table, count) in &status.counts {
            println!("  {table:<20} {count} row(s)");
        }
    }
}
