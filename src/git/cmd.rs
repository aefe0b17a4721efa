// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (credential helpers, hooks, SSH)
//! ```

use crate::error::IpKeepResult;
use std::path::Path;

use super::backend::{GitMutation, ShellBackend};

/// Initialize a new repository whose first branch is `initial_branch`.
///
/// # Errors
///
/// Returns a `GitError` if repository initialization fails.
pub fn init_repo(path: &Path, initial_branch: &str) -> IpKeepResult<()> {
    ShellBackend::init_repo(path, initial_branch)
}

/// Set git config value.
///
/// # Errors
///
/// Returns a `GitError` if the config value cannot be set.
pub fn set_config(repo_path: &Path, key: &str, value: &str) -> IpKeepResult<()> {
    ShellBackend::set_config(repo_path, key, value)
}

/// Add a remote.
///
/// # Errors
///
/// Returns a `GitError` if the remote cannot be added.
pub fn add_remote(repo_path: &Path, name: &str, url: &str) -> IpKeepResult<()> {
    ShellBackend::add_remote(repo_path, name, url)
}

/// Stage every change (`git add .`).
///
/// # Errors
///
/// Returns a `GitError` if staging fails.
pub fn add_all(repo_path: &Path) -> IpKeepResult<()> {
    ShellBackend::add_all(repo_path)
}

/// Commit staged changes with `message`.
///
/// # Errors
///
/// Returns a `GitError` if the commit fails.
pub fn commit(repo_path: &Path, message: &str) -> IpKeepResult<()> {
    ShellBackend::commit(repo_path, message)
}

/// Push `branch` to `remote`.
///
/// # Errors
///
/// Returns `GitError::PushFailed` if git exits with a failure status.
pub fn push(repo_path: &Path, remote: &str, branch: &str) -> IpKeepResult<()> {
    ShellBackend::push(repo_path, remote, branch)
}

/// Paths with staged, unstaged or untracked changes.
///
/// # Errors
///
/// Returns a `GitError` if `git status` fails.
pub fn changed_paths(repo_path: &Path) -> IpKeepResult<Vec<String>> {
    ShellBackend::changed_paths(repo_path)
}
