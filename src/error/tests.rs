// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, IpKeepError, IpKeepResult, NetworkError, StoreError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "push".to_string(),
        key: "repo_url".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'repo_url' in section '[push]'"
    );
}

#[test]
fn test_network_error_display() {
    let err = NetworkError::Exhausted { attempts: 3 };
    insta::assert_snapshot!(
        err.to_string(),
        @"no endpoint returned an address after 3 attempt(s)"
    );
}

#[test]
fn test_store_error_boxes_into_top_level() {
    let err: IpKeepError = StoreError::VersionOverflow(u64::MAX).into();
    assert!(matches!(err, IpKeepError::Store(_)));
    assert!(err.to_string().starts_with("store error: record version"));
}

#[test]
fn test_push_failure_display() {
    let err: IpKeepError = GitError::PushFailed {
        remote: "origin".to_string(),
        branch: "master".to_string(),
        message: "rejected".to_string(),
    }
    .into();
    insta::assert_snapshot!(err.to_string(), @"git error: failed to push master to origin: rejected");
}

#[test]
fn test_ipkeep_error_size() {
    // One box plus discriminant
    let size = std::mem::size_of::<IpKeepError>();
    assert!(size <= 24, "IpKeepError is {size} bytes, expected <= 24");
}

#[test]
fn test_ipkeep_result_size() {
    let size = std::mem::size_of::<IpKeepResult<()>>();
    assert!(size <= 24, "IpKeepResult<()> is {size} bytes, expected <= 24");
}
