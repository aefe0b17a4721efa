// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config
//!   [global]    dry, log levels, log file, timestamps
//!   [tracker]   record directory and file naming
//!   [resolver]  endpoints, timeout, retry pacing
//!   [push]      remote, branch, identity defaults
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::git::ops::{DEFAULT_BRANCH, DEFAULT_PROFILE_FILE, DEFAULT_REMOTE};
use crate::git::profile::PushProfile;
use crate::logging::{LogConfig, LogLevel};
use crate::net::resolver::{
    AddressResolver, DEFAULT_ENDPOINTS, DEFAULT_RETRY_INTERVAL, DEFAULT_TIMEOUT,
};
use crate::tracker::record::RecordPattern;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Report what would change without writing records or running git.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; empty disables file logging.
    pub log_file: PathBuf,
    /// Prefix console lines with a timestamp. Off suits schedulers that
    /// stamp output themselves.
    pub log_timestamps: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
            log_timestamps: true,
        }
    }
}

impl GlobalConfig {
    /// The log file, if one is configured.
    #[must_use]
    pub fn log_file(&self) -> Option<&std::path::Path> {
        (!self.log_file.as_os_str().is_empty()).then_some(self.log_file.as_path())
    }

    /// Logging setup described by this section.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.output_log_level)
            .with_file_level(self.file_log_level)
            .maybe_with_log_file(self.log_file().map(|p| p.display().to_string()))
            .with_show_timestamps(self.log_timestamps)
            .build()
    }
}

/// Where records live and how they are named.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Record directory; empty means the directory of the executable.
    pub directory: PathBuf,
    pub prefix: String,
    pub extension: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            prefix: RecordPattern::DEFAULT_PREFIX.to_string(),
            extension: RecordPattern::DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Public address resolver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Probed in order; the first valid answer wins.
    pub endpoints: Vec<String>,
    /// Per-endpoint request timeout.
    pub timeout_secs: u64,
    /// Pause between two full passes.
    pub retry_interval_secs: u64,
    /// Passes before giving up; 0 retries until interrupted.
    pub max_attempts: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.iter().map(ToString::to_string).collect(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            retry_interval_secs: DEFAULT_RETRY_INTERVAL.as_secs(),
            max_attempts: 0,
        }
    }
}

impl ResolverConfig {
    /// Build a resolver from these settings.
    #[must_use]
    pub fn to_resolver(&self) -> AddressResolver {
        AddressResolver::builder()
            .with_endpoints(self.endpoints.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry_interval(Duration::from_secs(self.retry_interval_secs))
            .with_max_attempts(self.max_attempts)
            .build()
    }
}

/// Defaults for `ipkeep push`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PushConfig {
    pub remote: String,
    pub branch: String,
    pub username: String,
    pub email: String,
    pub repo_url: String,
    /// Saved identity, relative to the pushed directory.
    pub profile_file: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            username: String::new(),
            email: String::new(),
            repo_url: String::new(),
            profile_file: DEFAULT_PROFILE_FILE.to_string(),
        }
    }
}

impl PushConfig {
    /// Identity fields as the lowest-priority profile layer.
    #[must_use]
    pub fn profile(&self) -> PushProfile {
        PushProfile::new(
            Some(self.username.clone()),
            Some(self.email.clone()),
            Some(self.repo_url.clone()),
        )
    }
}
