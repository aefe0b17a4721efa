// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `push` command.

use anyhow::bail;

use crate::cli::push::PushArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::ops::{InitOutcome, PushOptions, push_directory};
use crate::git::profile::PushProfile;

/// Build push options from flags layered over the `[push]` section.
#[must_use]
pub fn push_options(args: &PushArgs, config: &Config) -> PushOptions {
    PushOptions::builder()
        .with_remote(args.remote.clone().unwrap_or_else(|| config.push.remote.clone()))
        .with_branch(args.branch.clone().unwrap_or_else(|| config.push.branch.clone()))
        .with_profile_file(config.push.profile_file.clone())
        .maybe_with_message(args.message.clone())
        .with_overrides(PushProfile::new(
            args.username.clone(),
            args.email.clone(),
            args.repo_url.clone(),
        ))
        .with_defaults(config.push.profile())
        .with_dry_run(config.global.dry)
        .build()
}

/// Run the `push` command.
///
/// # Errors
///
/// Returns an error if the directory does not exist, identity is missing for
/// a new repository, or any git step fails.
pub fn run_push_command(args: &PushArgs, config: &Config) -> Result<()> {
    let dir = config.record_directory(args.dir.as_deref())?;
    if !dir.is_dir() {
        bail!("directory does not exist: {}", dir.display());
    }

    let options = push_options(args, config);
    let (init, outcome) = push_directory(&dir, &options)?;

    match init {
        InitOutcome::Initialized(_) => println!("initialised repository in {}", dir.display()),
        InitOutcome::Planned(_) => println!("would initialise repository in {}", dir.display()),
        InitOutcome::AlreadyInitialized => {}
    }
    println!("{outcome}");
    Ok(())
}
