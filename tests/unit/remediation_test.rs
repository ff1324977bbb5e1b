//! Tests for remediation against the site database and a real media root

use std::fs;
use std::sync::Barrier;
use std::thread;

use brightminds::adapters::FsStorage;
use brightminds::core::models::{Collection, RemediationAction};
use brightminds::core::ports::ContentRepository;
use brightminds::core::services::{Reconciler, Remediator};
use rusqlite::params;

use crate::common::{FaultyStorage, TestSite};

const SUBSTITUTE: &str = "gallery_media/sample_image.svg";

#[test]
fn fixed_records_reconcile_clean() {
    let site = TestSite::new();
    site.add_substitute();
    let id = site.add_gallery_item(
        "Gone",
        "image",
        Some("gallery_media/gone.jpg"),
        Some("gallery_thumbnails/gone.png"),
    );
    let store = site.store();
    let storage = FsStorage::new();
    let reconciler = Reconciler::new(&storage, site.media_root(), Collection::Gallery);

    let report = reconciler.reconcile(&store.list_all(Collection::Gallery).unwrap());
    let summary = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE)
        .remediate(&report)
        .unwrap();

    assert_eq!(summary.considered, 2);
    assert_eq!(summary.fixed, 2);
    assert_eq!(
        site.gallery_paths(id),
        (
            Some(format!("gallery_media/sample_{id}.svg")),
            Some(format!("gallery_thumbnails/sample_{id}_thumb.svg"))
        )
    );
    let copied =
        fs::read_to_string(site.media_root().join(format!("gallery_media/sample_{id}.svg")))
            .unwrap();
    assert!(copied.contains("<svg"));

    let after = reconciler.reconcile(&store.list_all(Collection::Gallery).unwrap());
    assert!(after.for_record(id).next().is_none());
    assert!(after.is_clean());
}

#[test]
fn fixing_twice_changes_nothing() {
    let site = TestSite::new();
    site.add_substitute();
    site.add_gallery_item("Gone", "image", Some("gallery_media/gone.jpg"), None);
    let store = site.store();
    let storage = FsStorage::new();
    let reconciler = Reconciler::new(&storage, site.media_root(), Collection::Gallery);
    let remediator = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE);

    let scan = || reconciler.reconcile(&store.list_all(Collection::Gallery).unwrap());
    let first = remediator.remediate(&scan()).unwrap();
    let second = remediator.remediate(&scan()).unwrap();

    assert_eq!(first.fixed, 1);
    assert_eq!(second.considered, 0);
}

#[test]
fn missing_substitute_leaves_records_alone() {
    let site = TestSite::new();
    let id = site.add_gallery_item("Gone", "image", Some("gallery_media/gone.jpg"), None);
    let store = site.store();
    let storage = FsStorage::new();

    let report = Reconciler::new(&storage, site.media_root(), Collection::Gallery)
        .reconcile(&store.list_all(Collection::Gallery).unwrap());
    let summary = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE)
        .remediate(&report)
        .unwrap();

    assert_eq!(summary.outcomes[0].action, RemediationAction::NoSubstitute);
    assert_eq!(summary.skipped, 1);
    assert_eq!(site.gallery_paths(id).0.as_deref(), Some("gallery_media/gone.jpg"));
}

#[test]
fn dry_run_plans_without_writing() {
    let site = TestSite::new();
    site.add_substitute();
    let id = site.add_gallery_item("Gone", "image", Some("gallery_media/gone.jpg"), None);
    let store = site.store();
    let storage = FsStorage::new();

    let report = Reconciler::new(&storage, site.media_root(), Collection::Gallery)
        .reconcile(&store.list_all(Collection::Gallery).unwrap());
    let summary = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE)
        .dry_run(true)
        .remediate(&report)
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(
        summary.outcomes[0].action,
        RemediationAction::Planned {
            new_path: format!("gallery_media/sample_{id}.svg")
        }
    );
    assert_eq!(site.gallery_paths(id).0.as_deref(), Some("gallery_media/gone.jpg"));
    assert!(!site.media_root().join(format!("gallery_media/sample_{id}.svg")).exists());
}

#[test]
fn failed_copy_never_rewrites_record() {
    let site = TestSite::new();
    site.add_substitute();
    let id = site.add_gallery_item("Gone", "image", Some("gallery_media/gone.jpg"), None);
    let store = site.store();
    let storage = FaultyStorage::new(FsStorage::new()).failing_copies();

    let report = Reconciler::new(&storage, site.media_root(), Collection::Gallery)
        .reconcile(&store.list_all(Collection::Gallery).unwrap());
    let summary = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE)
        .remediate(&report)
        .unwrap();

    assert!(matches!(summary.outcomes[0].action, RemediationAction::CopyFailed { .. }));
    assert_eq!(summary.failed, 1);
    assert_eq!(site.gallery_paths(id).0.as_deref(), Some("gallery_media/gone.jpg"));
}

#[test]
fn record_changed_after_scan_is_stale() {
    let site = TestSite::new();
    site.add_substitute();
    let id = site.add_gallery_item("Gone", "image", Some("gallery_media/gone.jpg"), None);
    let store = site.store();
    let storage = FsStorage::new();

    let report = Reconciler::new(&storage, site.media_root(), Collection::Gallery)
        .reconcile(&store.list_all(Collection::Gallery).unwrap());

    // Someone re-uploads between scan and fix.
    site.conn()
        .execute(
            "UPDATE api_galleryitem SET media_file = 'gallery_media/new.jpg' WHERE id = ?1",
            params![id],
        )
        .unwrap();

    let summary = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE)
        .remediate(&report)
        .unwrap();

    assert_eq!(summary.outcomes[0].action, RemediationAction::Stale);
    assert_eq!(site.gallery_paths(id).0.as_deref(), Some("gallery_media/new.jpg"));
    assert!(!site.media_root().join(format!("gallery_media/sample_{id}.svg")).exists());
}

#[test]
fn concurrent_runs_rewrite_a_record_once() {
    let site = TestSite::new();
    site.add_substitute();
    let id = site.add_gallery_item("Gone", "image", Some("gallery_media/gone.jpg"), None);
    let storage = FsStorage::new();
    let report = Reconciler::new(&storage, site.media_root(), Collection::Gallery)
        .reconcile(&site.store().list_all(Collection::Gallery).unwrap());
    let start = Barrier::new(2);

    let run = || {
        let store = site.store();
        let remediator = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE);
        start.wait();
        remediator.remediate(&report).unwrap()
    };
    let summaries = thread::scope(|scope| {
        let first = scope.spawn(run);
        let second = scope.spawn(run);
        [first.join().unwrap(), second.join().unwrap()]
    });

    let actions: Vec<_> = summaries.iter().map(|s| s.outcomes[0].action.clone()).collect();
    let fixed = actions.iter().filter(|a| matches!(a, RemediationAction::Fixed { .. })).count();
    let stale = actions.iter().filter(|a| **a == RemediationAction::Stale).count();
    assert_eq!((fixed, stale), (1, 1), "unexpected outcomes: {actions:?}");

    let (primary, _) = site.gallery_paths(id);
    let primary = primary.unwrap();
    assert_eq!(primary, format!("gallery_media/sample_{id}.svg"));
    assert!(site.media_root().join(&primary).is_file());
}

#[test]
fn unknown_entries_are_skipped() {
    let site = TestSite::new();
    site.add_substitute();
    let id = site.add_gallery_item("Locked", "image", Some("gallery_media/locked.jpg"), None);
    let store = site.store();
    let storage = FaultyStorage::new(FsStorage::new()).unreadable("locked.jpg");

    let report = Reconciler::new(&storage, site.media_root(), Collection::Gallery)
        .reconcile(&store.list_all(Collection::Gallery).unwrap());
    let summary = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE)
        .remediate(&report)
        .unwrap();

    assert_eq!(summary.outcomes[0].action, RemediationAction::SkippedUnknown);
    assert_eq!(site.gallery_paths(id).0.as_deref(), Some("gallery_media/locked.jpg"));
}

#[test]
fn image_substitute_for_video_is_flagged() {
    let site = TestSite::new();
    site.add_substitute();
    let id = site.add_gallery_item("Reel", "video", Some("gallery_media/reel.mp4"), None);
    let store = site.store();
    let storage = FsStorage::new();

    let report = Reconciler::new(&storage, site.media_root(), Collection::Gallery)
        .reconcile(&store.list_all(Collection::Gallery).unwrap());
    let summary = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE)
        .remediate(&report)
        .unwrap();

    assert_eq!(
        summary.outcomes[0].action,
        RemediationAction::Fixed {
            new_path: format!("gallery_media/sample_{id}.svg"),
            type_mismatch: true,
        }
    );
}

#[test]
fn avatars_are_copied_into_avatar_directory() {
    let site = TestSite::new();
    site.add_substitute();
    let user = site.add_user("mira", "mira@example.com", "pw", true);
    let profile = site.add_profile(user, Some("avatars/mira.png"));
    let store = site.store();
    let storage = FsStorage::new();

    let report = Reconciler::new(&storage, site.media_root(), Collection::Avatars)
        .reconcile(&store.list_all(Collection::Avatars).unwrap());
    let summary = Remediator::new(&store, &storage, site.media_root(), SUBSTITUTE)
        .remediate(&report)
        .unwrap();

    assert_eq!(summary.fixed, 1);
    let avatar: String = site
        .conn()
        .query_row(
            "SELECT avatar FROM api_userprofile WHERE id = ?1",
            params![profile],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(avatar, format!("avatars/sample_{profile}.svg"));
    assert!(site.media_root().join(&avatar).is_file());
}
