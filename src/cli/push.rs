// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Push command arguments.
//!
//! Identity flags are only needed the first time a directory is pushed;
//! they are saved to the profile file for later runs.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `push` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PushArgs {
    /// Commit message (default: "Automatic update at <local time>").
    #[arg(short = 'm', long = "message", value_name = "MSG")]
    pub message: Option<String>,

    /// Git user.name for a newly initialised repository.
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// Git user.email for a newly initialised repository.
    #[arg(short = 'e', long)]
    pub email: Option<String>,

    /// Remote URL for a newly initialised repository.
    #[arg(long = "repo-url", value_name = "URL")]
    pub repo_url: Option<String>,

    /// Remote to push to (default: push.remote).
    #[arg(long)]
    pub remote: Option<String>,

    /// Branch to push (default: push.branch).
    #[arg(short = 'b', long)]
    pub branch: Option<String>,

    /// Directory to push (default: the record directory).
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,
}
