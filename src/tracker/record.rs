// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Record types and the file naming scheme.
//!
//! ```text
//! IP-Public3.txt
//! \_______/|\__/
//!  prefix  |  extension
//!       version
//! ```

use regex::Regex;
use std::fmt;

use crate::error::{ConfigError, StoreError};

/// Version number of a record. The first record ever written is version 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The version following this one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::VersionOverflow` at `u64::MAX`.
    pub fn next(self) -> Result<Self, StoreError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(StoreError::VersionOverflow(self.0))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record to be written: one address at one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub version: Version,
    pub address: String,
}

impl Record {
    #[must_use]
    pub fn new(version: Version, address: impl Into<String>) -> Self {
        Self {
            version,
            address: address.into(),
        }
    }
}

/// The authoritative record as read back from a store.
///
/// `address` is `None` when the record could not be read or holds no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRecord {
    pub version: Version,
    pub address: Option<String>,
}

/// Extract the stored address from record content.
///
/// Only the first line counts; surrounding whitespace is dropped.
#[must_use]
pub fn parse_address(content: &str) -> Option<String> {
    content
        .trim()
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
}

/// Naming scheme `<prefix><digits><extension>` for record files.
#[derive(Debug, Clone)]
pub struct RecordPattern {
    prefix: String,
    extension: String,
    regex: Regex,
}

impl RecordPattern {
    pub const DEFAULT_PREFIX: &'static str = "IP-Public";
    pub const DEFAULT_EXTENSION: &'static str = ".txt";

    /// Build a pattern from a prefix and an extension (including its dot).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the prefix is empty or ends in a
    /// digit, which would make version parsing ambiguous.
    pub fn new(prefix: &str, extension: &str) -> Result<Self, ConfigError> {
        if prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "tracker".to_string(),
                key: "prefix".to_string(),
                message: "prefix must not be empty".to_string(),
            });
        }
        if prefix.ends_with(|c: char| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidValue {
                section: "tracker".to_string(),
                key: "prefix".to_string(),
                message: format!("prefix must not end in a digit, got '{prefix}'"),
            });
        }

        let source = format!(
            "^{}([0-9]+){}$",
            regex::escape(prefix),
            regex::escape(extension)
        );
        let regex = Regex::new(&source).map_err(|e| ConfigError::InvalidValue {
            section: "tracker".to_string(),
            key: "prefix".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            prefix: prefix.to_string(),
            extension: extension.to_string(),
            regex,
        })
    }

    /// Whether `file_name` has the record shape, whatever the size of its
    /// digits.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    /// Parse the version out of a file name. Returns `None` for names that do
    /// not match or whose digits overflow a `u64`.
    #[must_use]
    pub fn version_of(&self, file_name: &str) -> Option<Version> {
        let captures = self.regex.captures(file_name)?;
        captures.get(1)?.as_str().parse().ok().map(Version::new)
    }

    #[must_use]
    pub fn file_name(&self, version: Version) -> String {
        format!("{}{}{}", self.prefix, version, self.extension)
    }
}
