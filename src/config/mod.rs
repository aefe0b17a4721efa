// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for ipkeep.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. ipkeep.toml (cwd, optional)
//! 3. --ini files
//! 4. IPKEEP_* env vars
//! 5. --set section.key=value
//! 6. dedicated CLI flags (--dir, --log-level, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! Sections and keys are separated by a double underscore so keys may
//! contain single ones.
//!
//! ```text
//! IPKEEP_GLOBAL__DRY=true                  → global.dry = true
//! IPKEEP_TRACKER__DIRECTORY=/srv/ip        → tracker.directory = "/srv/ip"
//! IPKEEP_RESOLVER__ENDPOINTS=https://a,... → resolver.endpoints = [...]
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, IpKeepResult, Result};
use crate::tracker::record::RecordPattern;

use loader::ConfigLoader;
use types::{GlobalConfig, PushConfig, ResolverConfig, TrackerConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Record storage.
    pub tracker: TrackerConfig,
    /// Public address resolution.
    pub resolver: ResolverConfig,
    /// `ipkeep push` defaults.
    pub push: PushConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ipkeep::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("ipkeep.toml")
    ///     .with_env_prefix("IPKEEP")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Config` structure, or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Reject values that would make every command fail later.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unusable record prefix, an
    /// empty or non-HTTP endpoint list, or a zero timeout.
    pub fn validate(&self) -> IpKeepResult<()> {
        self.record_pattern()?;

        if self.resolver.endpoints.is_empty() {
            return Err(invalid("resolver", "endpoints", "at least one endpoint is required").into());
        }
        if let Some(bad) = self
            .resolver
            .endpoints
            .iter()
            .find(|e| !(e.starts_with("http://") || e.starts_with("https://")))
        {
            return Err(invalid(
                "resolver",
                "endpoints",
                &format!("expected an http(s) URL, got '{bad}'"),
            )
            .into());
        }
        if self.resolver.timeout_secs == 0 {
            return Err(invalid("resolver", "timeout_secs", "must be greater than zero").into());
        }
        Ok(())
    }

    /// Naming scheme for record files.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `tracker.prefix` is unusable.
    pub fn record_pattern(&self) -> IpKeepResult<RecordPattern> {
        Ok(RecordPattern::new(
            &self.tracker.prefix,
            &self.tracker.extension,
        )?)
    }

    /// Directory holding the records.
    ///
    /// `--dir` wins, then `tracker.directory`, then the directory containing
    /// the running executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable path cannot be determined.
    pub fn record_directory(&self, cli_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_dir {
            return Ok(dir.to_path_buf());
        }
        if !self.tracker.directory.as_os_str().is_empty() {
            return Ok(self.tracker.directory.clone());
        }
        let exe = std::env::current_exe()?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow::anyhow!("executable path has no parent: {}", exe.display()))
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap` and aligned on `=`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_tracker_options(&mut options);
        self.format_resolver_options(&mut options);
        self.format_push_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
        options.insert(
            "global.log_timestamps".into(),
            self.global.log_timestamps.to_string(),
        );
    }

    fn format_tracker_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "tracker.directory".into(),
            self.tracker.directory.display().to_string(),
        );
        options.insert("tracker.prefix".into(), self.tracker.prefix.clone());
        options.insert("tracker.extension".into(), self.tracker.extension.clone());
    }

    fn format_resolver_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "resolver.endpoints".into(),
            self.resolver.endpoints.join(", "),
        );
        options.insert(
            "resolver.timeout_secs".into(),
            self.resolver.timeout_secs.to_string(),
        );
        options.insert(
            "resolver.retry_interval_secs".into(),
            self.resolver.retry_interval_secs.to_string(),
        );
        options.insert(
            "resolver.max_attempts".into(),
            self.resolver.max_attempts.to_string(),
        );
    }

    fn format_push_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("push.remote".into(), self.push.remote.clone());
        options.insert("push.branch".into(), self.push.branch.clone());
        options.insert("push.username".into(), self.push.username.clone());
        options.insert("push.email".into(), self.push.email.clone());
        options.insert("push.repo_url".into(), self.push.repo_url.clone());
        options.insert("push.profile_file".into(), self.push.profile_file.clone());
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
