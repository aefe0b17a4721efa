// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Public address resolution over an ordered list of HTTP endpoints.
//!
//! ```text
//! resolve()
//!   api.ipify.org  --fail-->  ifconfig.me/ip  --ok--> Found(addr)
//!   (timeout, http error, bad body => ProbeFailure, next endpoint)
//!   all failed => Exhausted([failures])
//!
//! wait_for_address(cancel)
//!   loop { resolve() | Found => return
//!                    | Exhausted => attempts left? sleep(retry_interval) }
//!   Ctrl+C => Interrupted
//! ```

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use bon::Builder;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{fetch_text, global_client};
use crate::error::{IpKeepResult, NetworkError};

/// Endpoints probed when none are configured, in order.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://api.ipify.org",
    "https://ifconfig.me/ip",
    "https://icanhazip.com",
    "https://ifconfig.co/ip",
];

/// Per-endpoint request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Pause between two full passes over the endpoints.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(5);

/// A validated public address and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    /// The address exactly as the endpoint spelled it (first line, trimmed).
    pub address: String,
    pub ip: IpAddr,
    pub endpoint: String,
}

/// Why one endpoint did not produce an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub endpoint: String,
    pub reason: String,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.endpoint, self.reason)
    }
}

/// Result of one pass over the endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedAddress),
    /// Every endpoint failed, in probe order.
    Exhausted(Vec<ProbeFailure>),
}

/// Check that `text` holds an IPv4 or IPv6 address.
///
/// Only the first line of the trimmed text is considered. The returned string
/// keeps the original spelling so records compare exactly.
///
/// # Errors
///
/// Returns `NetworkError::InvalidAddress` if the first line is empty or not an
/// IP address.
pub fn validate_address(source_name: &str, text: &str) -> Result<(String, IpAddr), NetworkError> {
    let line = text.trim().lines().next().map(str::trim).unwrap_or_default();
    line.parse::<IpAddr>()
        .map(|ip| (line.to_string(), ip))
        .map_err(|_| NetworkError::InvalidAddress {
            source_name: source_name.to_string(),
            text: line.to_string(),
        })
}

/// Probes endpoints in order until one returns a valid address.
///
/// # Example
/// ```ignore
/// use ipkeep::net::resolver::AddressResolver;
///
/// let resolver = AddressResolver::builder()
///     .with_endpoints(vec!["https://api.ipify.org".to_string()])
///     .with_max_attempts(3)
///     .build();
/// let found = resolver.wait_for_address(&cancel).await?;
/// ```
#[derive(Debug, Clone, Builder)]
pub struct AddressResolver {
    #[builder(setters(name = with_endpoints), default = DEFAULT_ENDPOINTS.iter().map(ToString::to_string).collect())]
    endpoints: Vec<String>,
    #[builder(setters(name = with_timeout), default = DEFAULT_TIMEOUT)]
    timeout: Duration,
    #[builder(setters(name = with_retry_interval), default = DEFAULT_RETRY_INTERVAL)]
    retry_interval: Duration,
    /// Passes before giving up; 0 waits forever.
    #[builder(setters(name = with_max_attempts), default = 0)]
    max_attempts: u32,
    #[builder(skip = global_client().clone())]
    client: Client,
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AddressResolver {
    #[must_use]
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub const fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// One pass over the endpoints; the first valid answer wins.
    pub async fn resolve(&self) -> Resolution {
        let mut failures = Vec::new();

        for endpoint in &self.endpoints {
            match self.probe(endpoint).await {
                Ok(found) => {
                    debug!(endpoint = %endpoint, address = %found.address, "address resolved");
                    return Resolution::Found(found);
                }
                Err(e) => {
                    debug!(endpoint = %endpoint, error = %e, "probe failed");
                    failures.push(ProbeFailure {
                        endpoint: endpoint.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Resolution::Exhausted(failures)
    }

    async fn probe(&self, endpoint: &str) -> IpKeepResult<ResolvedAddress> {
        let body = fetch_text(&self.client, endpoint, self.timeout).await?;
        let (address, ip) = validate_address(endpoint, &body)?;
        Ok(ResolvedAddress {
            address,
            ip,
            endpoint: endpoint.to_string(),
        })
    }

    /// Resolve repeatedly, sleeping `retry_interval` between passes, until an
    /// address is found.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidUrl` if no endpoints are configured,
    /// `NetworkError::Exhausted` once `max_attempts` passes have failed, and
    /// `NetworkError::Interrupted` if `cancel` fires.
    pub async fn wait_for_address(
        &self,
        cancel: &CancellationToken,
    ) -> IpKeepResult<ResolvedAddress> {
        if self.endpoints.is_empty() {
            return Err(NetworkError::InvalidUrl("no resolver endpoints configured".to_string()).into());
        }

        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);

            let resolution = tokio::select! {
                () = cancel.cancelled() => return Err(NetworkError::Interrupted.into()),
                resolution = self.resolve() => resolution,
            };

            let failures = match resolution {
                Resolution::Found(found) => return Ok(found),
                Resolution::Exhausted(failures) => failures,
            };

            if self.max_attempts != 0 && attempt >= self.max_attempts {
                warn!(attempts = attempt, "giving up on address resolution");
                return Err(NetworkError::Exhausted { attempts: attempt }.into());
            }

            info!(
                attempt,
                failed = failures.len(),
                retry_in = ?self.retry_interval,
                "no endpoint answered, waiting for connectivity"
            );

            tokio::select! {
                () = cancel.cancelled() => return Err(NetworkError::Interrupted.into()),
                () = tokio::time::sleep(self.retry_interval) => {}
            }
        }
    }
}
