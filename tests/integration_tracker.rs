// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the address tracker on a real directory.

use ipkeep::tracker::record::{RecordPattern, Version};
use ipkeep::tracker::store::{DirectoryStore, RecordStore};
use ipkeep::tracker::{ReconcileOutcome, Tracker, reconcile};
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn write(dir: &Path, name: &str, content: &[u8]) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn tracker_first_run_creates_version_one() {
    let temp = temp_dir();
    let outcome = reconcile(temp.path(), "1.2.3.4").unwrap();

    assert!(matches!(outcome, ReconcileOutcome::Created { .. }));
    assert_eq!(names(temp.path()), ["IP-Public1.txt"]);
    assert_eq!(read(temp.path(), "IP-Public1.txt"), "1.2.3.4\n");
}

#[test]
fn tracker_same_address_touches_nothing() {
    let temp = temp_dir();
    write(temp.path(), "IP-Public7.txt", b"203.0.113.7\n");
    let before = std::fs::metadata(temp.path().join("IP-Public7.txt"))
        .unwrap()
        .modified()
        .unwrap();

    let outcome = reconcile(temp.path(), "203.0.113.7").unwrap();

    assert!(matches!(outcome, ReconcileOutcome::Unchanged { .. }));
    assert_eq!(outcome.record().version, Version::new(7));
    assert_eq!(names(temp.path()), ["IP-Public7.txt"]);
    let after = std::fs::metadata(temp.path().join("IP-Public7.txt"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(before, after);
}

#[test]
fn tracker_change_replaces_every_record() {
    let temp = temp_dir();
    write(temp.path(), "IP-Public1.txt", b"10.0.0.1\n");
    write(temp.path(), "IP-Public2.txt", b"10.0.0.2\n");
    write(temp.path(), "IP-Public10.txt", b"10.0.0.10\n");
    write(temp.path(), "notes.txt", b"keep me\n");
    write(temp.path(), "IP-Public.txt", b"not a record\n");

    let outcome = reconcile(temp.path(), "10.0.0.11").unwrap();

    let ReconcileOutcome::Updated {
        previous,
        record,
        failures,
    } = outcome
    else {
        panic!("expected Updated, got {outcome:?}");
    };
    assert_eq!(previous.as_deref(), Some("10.0.0.10"));
    assert_eq!(record.version, Version::new(11));
    assert!(failures.is_empty());
    assert_eq!(
        names(temp.path()),
        ["IP-Public.txt", "IP-Public11.txt", "notes.txt"]
    );
}

#[test]
fn tracker_change_removes_records_with_huge_versions() {
    let temp = temp_dir();
    write(temp.path(), "IP-Public99999999999999999999999.txt", b"10.0.0.99\n");
    write(temp.path(), "IP-Public2.txt", b"10.0.0.2\n");

    let outcome = reconcile(temp.path(), "10.0.0.3").unwrap();

    assert_eq!(outcome.record().version, Version::new(3));
    assert_eq!(names(temp.path()), ["IP-Public3.txt"]);
}

#[test]
fn tracker_names_without_extension_are_not_records() {
    let temp = temp_dir();
    write(temp.path(), "IP-Public7", b"10.0.0.7\n");
    write(temp.path(), "IP-Public2.txt", b"10.0.0.2\n");

    let outcome = reconcile(temp.path(), "10.0.0.3").unwrap();

    assert_eq!(outcome.record().version, Version::new(3));
    assert_eq!(names(temp.path()), ["IP-Public3.txt", "IP-Public7"]);
}

#[test]
fn tracker_second_run_is_a_no_op() {
    let temp = temp_dir();
    reconcile(temp.path(), "2001:db8::1").unwrap();
    let outcome = reconcile(temp.path(), "2001:db8::1").unwrap();

    assert!(!outcome.wrote());
    assert_eq!(names(temp.path()), ["IP-Public1.txt"]);
}

#[test]
fn tracker_compares_first_line_only() {
    let temp = temp_dir();
    write(temp.path(), "IP-Public3.txt", b"  192.0.2.8  \r\nsecond line\n");

    let outcome = reconcile(temp.path(), "192.0.2.8").unwrap();
    assert!(matches!(outcome, ReconcileOutcome::Unchanged { .. }));
}

#[test]
fn tracker_unreadable_latest_forces_update() {
    let temp = temp_dir();
    write(temp.path(), "IP-Public2.txt", &[0xff, 0xfe, 0x00]);

    let outcome = reconcile(temp.path(), "192.0.2.9").unwrap();

    let ReconcileOutcome::Updated { previous, record, .. } = outcome else {
        panic!("expected Updated, got {outcome:?}");
    };
    assert_eq!(previous, None);
    assert_eq!(record.version, Version::new(3));
    assert_eq!(names(temp.path()), ["IP-Public3.txt"]);
}

#[test]
fn tracker_custom_pattern_and_dry_run() {
    let temp = temp_dir();
    write(temp.path(), "wan_5.log", b"198.51.100.1\n");
    let pattern = RecordPattern::new("wan_", ".log").unwrap();

    let mut tracker =
        Tracker::new(DirectoryStore::new(temp.path(), pattern.clone())).with_dry_run(true);
    let outcome = tracker.reconcile("198.51.100.2").unwrap();
    assert!(outcome.wrote());
    assert_eq!(names(temp.path()), ["wan_5.log"]);

    let mut tracker = Tracker::new(DirectoryStore::new(temp.path(), pattern));
    tracker.reconcile("198.51.100.2").unwrap();
    assert_eq!(names(temp.path()), ["wan_6.log"]);
    assert_eq!(tracker.store().records().unwrap(), [Version::new(6)]);
}

#[test]
fn tracker_missing_directory_is_an_error() {
    let temp = temp_dir();
    let err = reconcile(&temp.path().join("missing"), "1.2.3.4").unwrap_err();
    assert!(err.to_string().contains("failed to list records"), "{err}");
}
