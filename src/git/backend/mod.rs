// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! changed_paths       --> ShellBackend (git status --porcelain)
//! ```

use crate::error::{GitError, GixError, IpKeepError, IpKeepResult, ProcessError};
use std::path::{Path, PathBuf};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> IpKeepResult<Option<String>>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
///
/// These go through the git CLI so the user's credential helpers, hooks and
/// SSH setup apply to the push.
pub trait GitMutation {
    /// Initialize a new repository with the given initial branch.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    fn init_repo(path: &Path, initial_branch: &str) -> IpKeepResult<()>;

    /// Set git config value.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the config value cannot be set.
    fn set_config(repo_path: &Path, key: &str, value: &str) -> IpKeepResult<()>;

    /// Add a remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote cannot be added.
    fn add_remote(repo_path: &Path, name: &str, url: &str) -> IpKeepResult<()>;

    /// Stage every change in the work tree (`git add .`).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if staging fails.
    fn add_all(repo_path: &Path) -> IpKeepResult<()>;

    /// Commit staged changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit fails (e.g. no identity configured).
    fn commit(repo_path: &Path, message: &str) -> IpKeepResult<()>;

    /// Push `branch` to `remote`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::PushFailed` with git's stderr if the push fails.
    fn push(repo_path: &Path, remote: &str, branch: &str) -> IpKeepResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok()
    }

    fn current_branch(path: &Path) -> IpKeepResult<Option<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
pub struct ShellBackend;

impl ShellBackend {
    /// Locate the git executable on PATH.
    pub(crate) fn git_executable() -> IpKeepResult<PathBuf> {
        which::which("git").map_err(|_| {
            ProcessError::ExecutableNotFound {
                name: "git".to_string(),
            }
            .into()
        })
    }

    /// Execute a git command and return its untrimmed stdout. Sets
    /// `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0` so an unattended
    /// run fails instead of waiting for input.
    fn git_output(args: &[&str], cwd: &Path) -> IpKeepResult<String> {
        use std::process::Command;

        let git = Self::git_executable()?;
        let output = Command::new(&git)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: format!("git {}", args.join(" ")),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Execute a git command and return its trimmed stdout.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> IpKeepResult<String> {
        Ok(Self::git_output(args, cwd)?.trim().to_string())
    }

    /// Paths reported by `git status --porcelain`, one entry per changed file.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status command fails.
    pub fn changed_paths(path: &Path) -> IpKeepResult<Vec<String>> {
        // Untrimmed: the first status column may be a space
        let output = Self::git_output(&["status", "--porcelain"], path)?;
        Ok(output
            .lines()
            .filter(|line| line.len() > 3)
            .map(|line| line[3..].to_string())
            .collect())
    }
}

impl GitMutation for ShellBackend {
    fn init_repo(path: &Path, initial_branch: &str) -> IpKeepResult<()> {
        let branch_arg = format!("--initial-branch={initial_branch}");
        Self::git_command(&["init", "--quiet", &branch_arg], path)?;
        Ok(())
    }

    fn set_config(repo_path: &Path, key: &str, value: &str) -> IpKeepResult<()> {
        Self::git_command(&["config", key, value], repo_path)?;
        Ok(())
    }

    fn add_remote(repo_path: &Path, name: &str, url: &str) -> IpKeepResult<()> {
        Self::git_command(&["remote", "add", name, url], repo_path)?;
        Ok(())
    }

    fn add_all(repo_path: &Path) -> IpKeepResult<()> {
        Self::git_command(&["add", "."], repo_path)?;
        Ok(())
    }

    fn commit(repo_path: &Path, message: &str) -> IpKeepResult<()> {
        Self::git_command(&["commit", "--quiet", "-m", message], repo_path)?;
        Ok(())
    }

    fn push(repo_path: &Path, remote: &str, branch: &str) -> IpKeepResult<()> {
        // git reports progress on stderr even on success; only the exit status counts
        Self::git_command(&["push", "--quiet", remote, branch], repo_path).map_err(|e| {
            match e {
                IpKeepError::Git(boxed) => match *boxed {
                    GitError::CommandFailed { message, .. } => GitError::PushFailed {
                        remote: remote.to_string(),
                        branch: branch.to_string(),
                        message,
                    }
                    .into(),
                    other => other.into(),
                },
                other => other,
            }
        })?;
        Ok(())
    }
}
