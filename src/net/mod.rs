// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network module: shared HTTP client and public address resolution.
//!
//! ```text
//! global_client()   OnceLock, connection pool, User-Agent ipkeep/VERSION
//!        |
//!        v
//! fetch_text(url, timeout)
//!        |
//!        v
//! resolver::AddressResolver
//!   resolve()           one ordered pass, first success wins
//!   wait_for_address()  resolve, sleep, retry until found/cancelled
//! ```

pub mod resolver;


use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Client;

use crate::error::{IpKeepResult, NetworkError};

/// Global HTTP client - initialized once, reused across all probes.
/// Falls back to a basic client if custom configuration fails.
pub(crate) fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("ipkeep/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// GET `url` and return the body as text.
///
/// # Errors
///
/// Returns `NetworkError::Timeout` if the request exceeds `timeout`,
/// `NetworkError::HttpError` on a non-success status, and
/// `NetworkError::Reqwest` for any other transport failure.
pub async fn fetch_text(client: &Client, url: &str, timeout: Duration) -> IpKeepResult<String> {
    let map_err = |e: reqwest::Error| {
        if e.is_timeout() {
            NetworkError::Timeout {
                url: url.to_string(),
            }
        } else {
            NetworkError::Reqwest(e)
        }
    };

    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(map_err)?;

    if !response.status().is_success() {
        return Err(NetworkError::HttpError {
            status: response.status().as_u16(),
            url: url.to_string(),
        }
        .into());
    }

    let text = response.text().await.map_err(map_err)?;
    Ok(text)
}
