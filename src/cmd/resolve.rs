// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `resolve` command and the address lookup shared with `update`.

use anyhow::bail;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;
use crate::net::resolver::{AddressResolver, Resolution, ResolvedAddress};

/// One pass over the endpoints; an error lists why each one failed.
///
/// # Errors
///
/// Returns an error naming every endpoint failure if none answered.
pub async fn resolve_once(resolver: &AddressResolver) -> Result<ResolvedAddress> {
    match resolver.resolve().await {
        Resolution::Found(found) => Ok(found),
        Resolution::Exhausted(failures) => {
            let details = failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            bail!("no endpoint returned an address: {details}")
        }
    }
}

/// Wait until an endpoint answers, stopping early on Ctrl+C.
///
/// # Errors
///
/// Returns an error if the attempt limit is reached or the wait is interrupted.
pub async fn resolve_waiting(resolver: &AddressResolver) -> Result<ResolvedAddress> {
    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, stopping address resolution...");
            cancel_on_signal.cancel();
        }
    });

    let result = resolver.wait_for_address(&cancel).await;
    signal.abort();
    Ok(result?)
}

/// Run the `resolve` command: print the public address.
///
/// # Errors
///
/// Returns an error if no endpoint answered.
pub async fn run_resolve_command(config: &Config) -> Result<()> {
    let resolver = config.resolver.to_resolver();
    let found = resolve_once(&resolver).await?;
    tracing::debug!(endpoint = %found.endpoint, "resolved");
    println!("{}", found.address);
    Ok(())
}
