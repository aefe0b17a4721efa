// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Record store abstraction and its filesystem implementation.
//!
//! ```text
//! RecordStore (trait)
//!   records()      all versions, ascending
//!   latest()       highest version + stored address
//!   replace_all()  remove every record (best effort), write one
//!        |
//!   +----+-------------+
//!   v                  v
//! DirectoryStore    MemoryStore
//! <dir>/IP-Public3.txt  BTreeMap (tests)
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use super::record::{LatestRecord, Record, RecordPattern, Version, parse_address};
use crate::error::{IpKeepResult, StoreError};

/// A record that could not be removed during [`RecordStore::replace_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalFailure {
    /// File name (or key) of the record left behind.
    pub name: String,
    pub reason: String,
}

/// What [`RecordStore::replace_all`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceReport {
    /// Names (or keys) of the records that were removed.
    pub removed: Vec<String>,
    /// Records that could not be removed. Non-empty means stale records may
    /// remain next to the new one.
    pub failures: Vec<RemovalFailure>,
}

/// Storage of versioned address records.
///
/// Implementors decide where records live. The tracker only relies on these
/// three operations.
pub trait RecordStore {
    /// List the versions of every stored record in ascending order.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be enumerated.
    fn records(&self) -> IpKeepResult<Vec<Version>>;

    /// Return the record with the highest version, if any.
    ///
    /// An unreadable or empty record is still returned, with `address: None`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be enumerated.
    fn latest(&self) -> IpKeepResult<Option<LatestRecord>>;

    /// Remove every stored record, then write `record`.
    ///
    /// Removal is best effort: individual failures are collected in the
    /// returned report and never abort the operation.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be enumerated or the new
    /// record cannot be written.
    fn replace_all(&mut self, record: &Record) -> IpKeepResult<ReplaceReport>;
}

/// A record file found in the directory.
#[derive(Debug, Clone)]
pub(super) struct Entry {
    /// `None` when the digits do not fit in a `u64`.
    version: Option<Version>,
    name: String,
    path: PathBuf,
}

/// Records stored as `<prefix><version><extension>` files in one directory.
///
/// A record whose digits overflow a `u64` can never be the latest, but it
/// still matches the pattern and is removed by [`RecordStore::replace_all`].
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
    pattern: RecordPattern,
}

impl DirectoryStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, pattern: RecordPattern) -> Self {
        Self {
            dir: dir.into(),
            pattern,
        }
    }

    /// Full path of the record file for `version`.
    #[must_use]
    pub fn path_of(&self, version: Version) -> PathBuf {
        self.dir.join(self.pattern.file_name(version))
    }

    /// Matching regular files, sorted by version then name. Out-of-range
    /// versions sort first.
    pub(super) fn scan(&self) -> IpKeepResult<Vec<Entry>> {
        let read_dir = std::fs::read_dir(&self.dir).map_err(|source| StoreError::ListFailed {
            path: self.dir.display().to_string(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| StoreError::ListFailed {
                path: self.dir.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !self.pattern.matches(name) {
                continue;
            }

            let version = self.pattern.version_of(name);
            match version {
                Some(version) => trace!(name, %version, "found record"),
                None => debug!(name, "record version out of range, removed on next change"),
            }
            entries.push(Entry {
                version,
                name: name.to_string(),
                path: path.clone(),
            });
        }

        entries.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.name.cmp(&b.name)));
        Ok(entries)
    }

    fn read_address(path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => parse_address(&content),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "record unreadable");
                None
            }
        }
    }

    /// Write `record` through a temporary file persisted into place.
    fn write(&self, record: &Record) -> IpKeepResult<PathBuf> {
        let target = self.path_of(record.version);
        let write_failed = |source| StoreError::WriteFailed {
            path: target.display().to_string(),
            source,
        };

        let mut file = NamedTempFile::new_in(&self.dir).map_err(write_failed)?;
        writeln!(file, "{}", record.address).map_err(write_failed)?;
        file.flush().map_err(write_failed)?;
        file.persist(&target).map_err(|e| write_failed(e.error))?;

        debug!(path = %target.display(), version = %record.version, "record written");
        Ok(target)
    }
}

/// Remove every entry with `remove`, collecting failures instead of stopping.
pub(super) fn remove_entries(
    entries: Vec<Entry>,
    mut remove: impl FnMut(&Path) -> std::io::Result<()>,
) -> ReplaceReport {
    let mut report = ReplaceReport::default();
    for entry in entries {
        match remove(&entry.path) {
            Ok(()) => {
                debug!(name = %entry.name, "record removed");
                report.removed.push(entry.name);
            }
            Err(e) => {
                debug!(name = %entry.name, error = %e, "record removal failed");
                report.failures.push(RemovalFailure {
                    name: entry.name,
                    reason: e.to_string(),
                });
            }
        }
    }
    report
}

impl RecordStore for DirectoryStore {
    fn records(&self) -> IpKeepResult<Vec<Version>> {
        Ok(self.scan()?.into_iter().filter_map(|e| e.version).collect())
    }

    fn latest(&self) -> IpKeepResult<Option<LatestRecord>> {
        let entries = self.scan()?;
        Ok(entries.iter().rev().find_map(|entry| {
            entry.version.map(|version| LatestRecord {
                version,
                address: Self::read_address(&entry.path),
            })
        }))
    }

    fn replace_all(&mut self, record: &Record) -> IpKeepResult<ReplaceReport> {
        let report = remove_entries(self.scan()?, |path| std::fs::remove_file(path));
        self.write(record)?;
        Ok(report)
    }
}
