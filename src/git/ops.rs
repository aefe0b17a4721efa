// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit-and-push workflow behind `ipkeep push`.
//!
//! ```text
//! ensure_initialized   git init, identity, remote, save profile
//!        |
//!        v
//! commit_and_push      status -> add . -> commit -> push R B
//!        |
//!        v
//! NoChanges | Pushed | Planned (dry run)
//! ```

use std::fmt;
use std::path::Path;

use anyhow::Context;
use bon::Builder;
use chrono::{DateTime, TimeZone};
use tracing::{debug, info, warn};

use super::cmd::{add_all, add_remote, changed_paths, commit, init_repo, push, set_config};
use super::profile::PushProfile;
use super::query::{current_branch, is_git_repo};
use crate::error::Result;

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_PROFILE_FILE: &str = ".ipkeep-push.json";

/// Options for one `push` run.
///
/// `overrides` come from the command line and win over the saved profile,
/// which wins over `defaults` from the configuration.
#[derive(Debug, Clone, Builder)]
pub struct PushOptions {
    #[builder(setters(name = with_remote), default = DEFAULT_REMOTE.to_string())]
    pub remote: String,
    #[builder(setters(name = with_branch), default = DEFAULT_BRANCH.to_string())]
    pub branch: String,
    #[builder(setters(name = with_profile_file), default = DEFAULT_PROFILE_FILE.to_string())]
    pub profile_file: String,
    /// Commit message; `None` or blank uses [`default_commit_message`].
    #[builder(setters(name = with_message))]
    pub message: Option<String>,
    #[builder(setters(name = with_overrides), default)]
    pub overrides: PushProfile,
    #[builder(setters(name = with_defaults), default)]
    pub defaults: PushProfile,
    #[builder(setters(name = with_dry_run), default = false)]
    pub dry_run: bool,
}

impl PushOptions {
    /// The explicit message, or the timestamped default when unset or blank.
    #[must_use]
    pub fn commit_message(&self) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map_or_else(
                || default_commit_message(&chrono::Local::now()),
                ToString::to_string,
            )
    }
}

/// What [`ensure_initialized`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    AlreadyInitialized,
    /// A repository was created with this identity.
    Initialized(PushProfile),
    /// Dry run: a repository would have been created with this identity.
    Planned(PushProfile),
}

/// What [`commit_and_push`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// The work tree was clean.
    NoChanges,
    Pushed {
        message: String,
        changed: Vec<String>,
    },
    /// Dry run: these paths would have been committed with `message`.
    Planned {
        message: String,
        changed: Vec<String>,
    },
}

impl fmt::Display for PushOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoChanges => f.write_str("no changes to commit"),
            Self::Pushed { message, changed } => {
                write!(f, "pushed {} changed path(s): {message}", changed.len())
            }
            Self::Planned { message, changed } => {
                write!(f, "would push {} changed path(s): {message}", changed.len())
            }
        }
    }
}

/// `Automatic update at YYYY-MM-DD HH:MM:SS` for the given instant.
pub fn default_commit_message<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("Automatic update at {}", at.format("%Y-%m-%d %H:%M:%S"))
}

/// Make sure `dir` is a git work tree with an identity and a remote.
///
/// A new repository gets `user.name`, `user.email` and the remote from the
/// merged profile, and the profile is saved to `options.profile_file` inside
/// `dir` for the next run.
///
/// # Errors
///
/// Returns an error if an identity field is missing, the saved profile is
/// unreadable, or any git command fails.
pub fn ensure_initialized(dir: &Path, options: &PushOptions) -> Result<InitOutcome> {
    if is_git_repo(dir) {
        debug!(dir = %dir.display(), "repository already initialised");
        return Ok(InitOutcome::AlreadyInitialized);
    }

    let profile_path = dir.join(&options.profile_file);
    let saved = PushProfile::load(&profile_path)?.unwrap_or_default();
    let profile = options
        .overrides
        .clone()
        .or(&saved)
        .or(&options.defaults);
    let identity = profile.identity()?;

    info!(
        dir = %dir.display(),
        remote = %options.remote,
        url = identity.repo_url,
        "initialising repository"
    );

    if options.dry_run {
        debug!(username = identity.username, email = identity.email, "would set identity");
        debug!(profile = %profile_path.display(), "would save profile");
        return Ok(InitOutcome::Planned(profile));
    }

    init_repo(dir, &options.branch)
        .with_context(|| format!("failed to initialise {}", dir.display()))?;
    set_config(dir, "user.name", identity.username).context("failed to set user.name")?;
    set_config(dir, "user.email", identity.email).context("failed to set user.email")?;
    add_remote(dir, &options.remote, identity.repo_url)
        .with_context(|| format!("failed to add remote {}", options.remote))?;
    profile
        .save(&profile_path)
        .with_context(|| format!("failed to save profile {}", profile_path.display()))?;

    Ok(InitOutcome::Initialized(profile))
}

/// Stage, commit and push every change in `dir`.
///
/// # Errors
///
/// Returns an error if `dir` is not a repository or any git command fails.
/// A rejected push surfaces as `GitError::PushFailed`.
pub fn commit_and_push(dir: &Path, options: &PushOptions) -> Result<PushOutcome> {
    let changed = changed_paths(dir)
        .with_context(|| format!("failed to read status of {}", dir.display()))?;
    if changed.is_empty() {
        info!(dir = %dir.display(), "no changes to commit");
        return Ok(PushOutcome::NoChanges);
    }

    let message = options.commit_message();

    if let Ok(Some(current)) = current_branch(dir)
        && current != options.branch
    {
        warn!(
            current = %current,
            pushing = %options.branch,
            "current branch differs from the branch being pushed"
        );
    }

    info!(changed = changed.len(), message = %message, "committing");

    if options.dry_run {
        for path in &changed {
            debug!(path = %path, "would commit");
        }
        debug!(remote = %options.remote, branch = %options.branch, "would push");
        return Ok(PushOutcome::Planned { message, changed });
    }

    add_all(dir).context("failed to stage changes")?;
    commit(dir, &message).context("failed to commit")?;
    push(dir, &options.remote, &options.branch)?;

    info!(remote = %options.remote, branch = %options.branch, "pushed");
    Ok(PushOutcome::Pushed { message, changed })
}

/// Run the whole workflow: initialise if needed, then commit and push.
///
/// In a dry run against a directory that is not yet a repository there is
/// nothing to inspect, so the push step reports `Planned` with no paths.
///
/// # Errors
///
/// Returns any error from [`ensure_initialized`] or [`commit_and_push`].
pub fn push_directory(dir: &Path, options: &PushOptions) -> Result<(InitOutcome, PushOutcome)> {
    let init = ensure_initialized(dir, options)?;
    if matches!(init, InitOutcome::Planned(_)) {
        return Ok((
            init,
            PushOutcome::Planned {
                message: options.commit_message(),
                changed: Vec::new(),
            },
        ));
    }
    let outcome = commit_and_push(dir, options)?;
    Ok((init, outcome))
}
