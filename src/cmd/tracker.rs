// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `update` and `show` commands.
//!
//! ```text
//! update: --address A | resolver (wait or single pass)
//!            |
//!            v
//!         Tracker<DirectoryStore>::reconcile --> print outcome
//!
//! show:   DirectoryStore::latest + records --> print
//! ```

use anyhow::Context;
use std::path::Path;
use tracing::info;

use super::resolve::{resolve_once, resolve_waiting};
use crate::cli::tracker::{ShowArgs, UpdateArgs};
use crate::config::Config;
use crate::error::Result;
use crate::net::resolver::validate_address;
use crate::tracker::memory::MemoryStore;
use crate::tracker::store::{DirectoryStore, RecordStore};
use crate::tracker::Tracker;

/// Run the `update` command.
///
/// # Errors
///
/// Returns an error if no address could be obtained, the record directory
/// cannot be created, or the store fails.
pub async fn run_update_command(args: &UpdateArgs, config: &Config) -> Result<()> {
    let dir = config.record_directory(args.dir.as_deref())?;
    let pattern = config.record_pattern()?;
    let dry_run = config.global.dry;

    let address = if let Some(text) = &args.address {
        validate_address("--address", text)?.0
    } else {
        let resolver = config.resolver.to_resolver();
        let found = if args.no_wait {
            resolve_once(&resolver).await?
        } else {
            resolve_waiting(&resolver).await?
        };
        info!(endpoint = %found.endpoint, address = %found.address, "public address");
        found.address
    };

    if !dir.exists() {
        if dry_run {
            // Nothing to read yet; plan against an empty store
            info!(dir = %dir.display(), "would create record directory");
            let outcome = Tracker::new(MemoryStore::new())
                .with_dry_run(true)
                .reconcile(&address)?;
            println!("{}", outcome.planned());
            return Ok(());
        }
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create record directory {}", dir.display()))?;
    }

    let mut tracker = Tracker::new(DirectoryStore::new(&dir, pattern)).with_dry_run(dry_run);
    let outcome = tracker.reconcile(&address)?;

    if dry_run {
        println!("{}", outcome.planned());
    } else {
        println!("{outcome}");
        if outcome.wrote() {
            let path = tracker.store().path_of(outcome.record().version);
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Run the `show` command.
///
/// # Errors
///
/// Returns an error if the record directory cannot be listed.
pub fn run_show_command(args: &ShowArgs, config: &Config) -> Result<()> {
    let dir = config.record_directory(args.dir.as_deref())?;
    let store = DirectoryStore::new(&dir, config.record_pattern()?);
    for line in describe_records(&store, &dir)? {
        println!("{line}");
    }
    Ok(())
}

/// Lines printed by `show`.
///
/// # Errors
///
/// Returns an error if the store cannot be listed.
pub fn describe_records(store: &impl RecordStore, dir: &Path) -> Result<Vec<String>> {
    let Some(latest) = store.latest()? else {
        return Ok(vec![format!("no records in {}", dir.display())]);
    };
    let versions = store
        .records()?
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    Ok(vec![
        format!("directory: {}", dir.display()),
        format!("latest:    version {}", latest.version),
        format!(
            "address:   {}",
            latest.address.as_deref().unwrap_or("<unreadable>")
        ),
        format!("versions:  {versions}"),
    ])
}
