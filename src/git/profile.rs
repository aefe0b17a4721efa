// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Saved push identity.
//!
//! ```text
//! --username/--email/--repo-url   (highest)
//!        | or
//! .ipkeep-push.json in the pushed directory
//!        | or
//! [push] section of the configuration   (lowest)
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, IpKeepResult};

/// Git identity and remote used to initialise a repository.
///
/// Empty strings count as unset so config defaults of `""` never shadow a
/// lower layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl PushProfile {
    /// Build a profile, dropping empty values.
    #[must_use]
    pub fn new(username: Option<String>, email: Option<String>, repo_url: Option<String>) -> Self {
        Self {
            username: non_empty(username),
            email: non_empty(email),
            repo_url: non_empty(repo_url),
        }
    }

    /// Fill every unset field of `self` from `fallback`.
    #[must_use]
    pub fn or(self, fallback: &Self) -> Self {
        Self {
            username: non_empty(self.username).or_else(|| non_empty(fallback.username.clone())),
            email: non_empty(self.email).or_else(|| non_empty(fallback.email.clone())),
            repo_url: non_empty(self.repo_url).or_else(|| non_empty(fallback.repo_url.clone())),
        }
    }

    /// Load a saved profile. A missing file is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file exists but cannot be read,
    /// and `ConfigError::ParseError` if it is not a valid profile.
    pub fn load(path: &Path) -> IpKeepResult<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.display().to_string(),
                    source,
                }
                .into());
            }
        };

        let profile: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Some(Self::new(profile.username, profile.email, profile.repo_url)))
    }

    /// Write the profile as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if serialization fails and an I/O
    /// error if the file cannot be written.
    pub fn save(&self, path: &Path) -> IpKeepResult<()> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Borrow every field, failing on the first unset one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` naming the `[push]` key that is unset.
    pub fn identity(&self) -> IpKeepResult<Identity<'_>> {
        Ok(Identity {
            username: required(self.username.as_deref(), "username")?,
            email: required(self.email.as_deref(), "email")?,
            repo_url: required(self.repo_url.as_deref(), "repo_url")?,
        })
    }
}

/// A complete identity, borrowed from a [`PushProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub repo_url: &'a str,
}

fn required<'a>(field: Option<&'a str>, key: &str) -> IpKeepResult<&'a str> {
    field.ok_or_else(|| {
        ConfigError::MissingKey {
            section: "push".to_string(),
            key: key.to_string(),
        }
        .into()
    })
}
