// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for ipkeep using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! ipkeep [global options] <command>
//! version
//! options
//! inis
//! resolve
//! update [--dir D] [--address A] [--no-wait]
//! show [--dir D]
//! push [-m MSG] [--username U] [--email E] [--repo-url URL] [--remote R] [--branch B] [--dir D]
//! ```

pub mod global;
pub mod push;
pub mod tracker;


use crate::cli::global::GlobalOptions;
use crate::cli::push::PushArgs;
use crate::cli::tracker::{ShowArgs, UpdateArgs};
use clap::{Parser, Subcommand};

/// Public address tracker
///
/// Records changes of this machine's public address as numbered text files.
#[derive(Debug, Parser)]
#[command(
    name = "ipkeep",
    author,
    version,
    about = "Public address tracker",
    long_about = "ipkeep Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Looks up the public address of this machine and keeps the\n\
                  latest one in a numbered file such as `IP-Public3.txt`. Run\n\
                  `ipkeep update` periodically, then `ipkeep push` to publish\n\
                  the record directory to a git remote.",
    after_help = "CONFIGURATION:\n\n\
                  ipkeep reads `ipkeep.toml` from the current directory if it\n\
                  exists, then every file given with --ini, in order. Later files\n\
                  override earlier ones. IPKEEP_<SECTION>__<KEY> environment\n\
                  variables override files, --set overrides the environment, and\n\
                  dedicated flags such as --log-level override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used by ipkeep.
    Inis,

    /// Resolves the public address once and prints it.
    Resolve,

    /// Resolves the public address and records it if it changed.
    Update(UpdateArgs),

    /// Prints the latest record and every stored version.
    Show(ShowArgs),

    /// Commits every change in a directory and pushes it.
    Push(PushArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
