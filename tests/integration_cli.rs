// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end tests running the `ipkeep` binary.
//!
//! Every run happens in a fresh working directory so no stray `ipkeep.toml`
//! is picked up. Addresses are given with `--address`, so no network is used.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn ipkeep(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ipkeep"))
        .args(args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run ipkeep")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn record_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn cli_version_command() {
    let cwd = temp_dir();
    let output = ipkeep(cwd.path(), &["version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn cli_update_lifecycle() {
    let cwd = temp_dir();
    let records = cwd.path().join("records");
    let dir = records.to_str().unwrap();

    // Missing directory is created
    let output = ipkeep(cwd.path(), &["-l", "0", "update", "--dir", dir, "-a", "203.0.113.7"]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).starts_with("no previous record, created version 1 with 203.0.113.7"));
    assert_eq!(record_names(&records), ["IP-Public1.txt"]);
    assert_eq!(
        std::fs::read_to_string(records.join("IP-Public1.txt")).unwrap(),
        "203.0.113.7\n"
    );

    // Same address: exit 0, nothing written
    let output = ipkeep(cwd.path(), &["-l", "0", "update", "--dir", dir, "-a", "203.0.113.7"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "address unchanged (203.0.113.7), no action taken"
    );
    assert_eq!(record_names(&records), ["IP-Public1.txt"]);

    // New address replaces the record
    let output = ipkeep(cwd.path(), &["-l", "0", "update", "--dir", dir, "-a", "198.51.100.20"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with(
        "address changed from 203.0.113.7 to 198.51.100.20, created version 2"
    ));
    assert_eq!(record_names(&records), ["IP-Public2.txt"]);

    let output = ipkeep(cwd.path(), &["-l", "0", "show", "--dir", dir]);
    assert!(output.status.success());
    let shown = stdout(&output);
    assert!(shown.contains("latest:    version 2"), "{shown}");
    assert!(shown.contains("address:   198.51.100.20"), "{shown}");
    assert!(shown.contains("versions:  2"), "{shown}");
}

#[test]
fn cli_update_dry_run_writes_nothing() {
    let cwd = temp_dir();
    let dir = cwd.path().to_str().unwrap();
    std::fs::write(cwd.path().join("IP-Public4.txt"), "192.0.2.1\n").unwrap();

    let output = ipkeep(
        cwd.path(),
        &["-l", "0", "--dry", "update", "--dir", dir, "-a", "192.0.2.2"],
    );
    assert!(output.status.success());
    insta::assert_snapshot!(
        stdout(&output).trim_end(),
        @"address changed from 192.0.2.1 to 192.0.2.2, would create version 5"
    );
    assert_eq!(record_names(cwd.path()), ["IP-Public4.txt"]);
}

#[test]
fn cli_update_rejects_invalid_address() {
    let cwd = temp_dir();
    let dir = cwd.path().to_str().unwrap();

    let output = ipkeep(cwd.path(), &["-l", "0", "update", "--dir", dir, "-a", "not-an-ip"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid address from --address"), "{stderr}");
    assert!(record_names(cwd.path()).is_empty());
}

#[test]
fn cli_custom_prefix_via_set() {
    let cwd = temp_dir();
    let dir = cwd.path().to_str().unwrap();

    let output = ipkeep(
        cwd.path(),
        &[
            "-l",
            "0",
            "--set",
            "tracker.prefix=WAN-",
            "--set",
            "tracker.extension=.addr",
            "update",
            "--dir",
            dir,
            "-a",
            "2001:db8::1",
        ],
    );
    assert!(output.status.success(), "{output:?}");
    assert_eq!(record_names(cwd.path()), ["WAN-1.addr"]);
}

#[test]
fn cli_show_empty_directory() {
    let cwd = temp_dir();
    let dir = cwd.path().to_str().unwrap();

    let output = ipkeep(cwd.path(), &["-l", "0", "show", "--dir", dir]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("no records in "));
}

#[test]
fn cli_no_command_fails() {
    let cwd = temp_dir();
    let output = ipkeep(cwd.path(), &["-l", "0"]);
    assert!(!output.status.success());
}
