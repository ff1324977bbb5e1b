//! Tests for the Output module
//!
//! Output provides structured result types that can be rendered as either
//! human-readable text or machine-parseable JSON.

use std::path::PathBuf;

use brightminds::core::models::{
    Account, AssetRole, AssetState, Collection, ContentRecord, Discrepancy, DiscrepancyReport,
    RemediationAction, RemediationOutcome, RemediationSummary,
};
use brightminds::output::{
    ItemListResult, LoginResult, MediaCheckResult, MediaFixResult, OutputMode,
};

fn report() -> DiscrepancyReport {
    let mut report = DiscrepancyReport::new(Collection::Gallery, PathBuf::from("/srv/media"));
    report.records_scanned = 2;
    report.assets_checked = 3;
    report.push(Discrepancy {
        record_id: 7,
        title: "Night Train".to_string(),
        role: AssetRole::Thumbnail,
        recorded_path: "gallery_thumbnails/train.png".to_string(),
        resolved_path: PathBuf::from("/srv/media/gallery_thumbnails/train.png"),
        state: AssetState::Missing,
        media_type: Some("image".to_string()),
    });
    report
}

// =============================================================================
// OutputMode Tests
// =============================================================================

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn media_check_serializes_as_report() {
    let json = serde_json::to_value(MediaCheckResult { report: report() }).unwrap();

    assert_eq!(json["collection"], "gallery");
    assert_eq!(json["records_scanned"], 2);
    assert_eq!(json["missing_thumbnail"], 1);
    assert_eq!(json["discrepancies"][0]["state"], "missing");
    assert_eq!(json["discrepancies"][0]["role"], "thumbnail");
    assert_eq!(
        json["discrepancies"][0]["resolved_path"],
        "/srv/media/gallery_thumbnails/train.png"
    );
}

#[test]
fn media_fix_includes_report_and_outcomes() {
    let mut remediation = RemediationSummary::default();
    remediation.push(RemediationOutcome {
        record_id: 7,
        title: "Night Train".to_string(),
        role: AssetRole::Thumbnail,
        previous_path: "gallery_thumbnails/train.png".to_string(),
        action: RemediationAction::Fixed {
            new_path: "gallery_thumbnails/sample_7_thumb.svg".to_string(),
            type_mismatch: false,
        },
    });

    let json = serde_json::to_value(MediaFixResult {
        report: report(),
        remediation,
    })
    .unwrap();

    assert_eq!(json["report"]["missing_thumbnail"], 1);
    assert_eq!(json["remediation"]["fixed"], 1);
    assert_eq!(json["remediation"]["outcomes"][0]["action"], "fixed");
    assert_eq!(
        json["remediation"]["outcomes"][0]["new_path"],
        "gallery_thumbnails/sample_7_thumb.svg"
    );
}

#[test]
fn failed_login_has_no_account() {
    let json = serde_json::to_string(&LoginResult {
        identifier: "ghost".to_string(),
        authenticated: false,
        account: None,
    })
    .unwrap();

    assert!(json.contains("\"authenticated\":false"));
    assert!(!json.contains("account"));
}

#[test]
fn successful_login_hides_hash() {
    let json = serde_json::to_string(&LoginResult {
        identifier: "mira".to_string(),
        authenticated: true,
        account: Some(Account::new(1, "mira", "mira@example.com", "pbkdf2_sha256$1$salt$hash")),
    })
    .unwrap();

    assert!(json.contains("mira@example.com"));
    assert!(!json.contains("pbkdf2_sha256"));
}

#[test]
fn unknown_state_displays_reason() {
    let unknown = AssetState::Unknown {
        reason: "permission denied".to_string(),
    };
    assert_eq!(unknown.to_string(), "unknown (permission denied)");
    assert_eq!(AssetState::Missing.to_string(), "missing");
}

#[test]
fn item_list_serializes_records() {
    let json = serde_json::to_value(ItemListResult {
        collection: Collection::Poems,
        items: vec![ContentRecord::new(5, "Tide").with_primary("poem_media/tide.pdf")],
    })
    .unwrap();

    assert_eq!(json["collection"], "poems");
    assert_eq!(json["items"][0]["primary"], "poem_media/tide.pdf");
    assert!(json["items"][0]["thumbnail"].is_null());
}
