// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Record command arguments.
//!
//! ```text
//! update [--dir D] [--address A] [--no-wait]
//!   → resolve (or take A), reconcile against D
//! show [--dir D]
//!   → latest record + all versions in D
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `update` command.
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    /// Record directory (default: tracker.directory, else next to the executable).
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Use this address instead of asking the resolver endpoints.
    #[arg(short = 'a', long = "address", value_name = "ADDR")]
    pub address: Option<String>,

    /// Make a single pass over the endpoints instead of waiting for connectivity.
    #[arg(long = "no-wait", conflicts_with = "address")]
    pub no_wait: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    /// Record directory (default: tracker.directory, else next to the executable).
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,
}
