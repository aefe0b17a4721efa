// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory [`RecordStore`] for tests and dry experiments.

use std::collections::{BTreeMap, BTreeSet};

use super::record::{LatestRecord, Record, Version};
use super::store::{RecordStore, RemovalFailure, ReplaceReport};
use crate::error::IpKeepResult;

/// Records kept in a map. Removal failures can be injected per version.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<Version, Option<String>>,
    stuck: BTreeSet<Version>,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a readable record.
    #[must_use]
    pub fn with_record(mut self, version: u64, address: &str) -> Self {
        self.records
            .insert(Version::new(version), Some(address.to_string()));
        self
    }

    /// Seed a record whose content cannot be read.
    #[must_use]
    pub fn with_unreadable(mut self, version: u64) -> Self {
        self.records.insert(Version::new(version), None);
        self
    }

    /// Make removal of `version` fail in every later `replace_all`.
    #[must_use]
    pub fn with_stuck(mut self, version: u64) -> Self {
        self.stuck.insert(Version::new(version));
        self
    }

    #[must_use]
    pub fn address_of(&self, version: u64) -> Option<&str> {
        self.records
            .get(&Version::new(version))
            .and_then(Option::as_deref)
    }

    /// Number of `replace_all` calls that reached the write step.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl RecordStore for MemoryStore {
    fn records(&self) -> IpKeepResult<Vec<Version>> {
        Ok(self.records.keys().copied().collect())
    }

    fn latest(&self) -> IpKeepResult<Option<LatestRecord>> {
        Ok(self
            .records
            .last_key_value()
            .map(|(version, address)| LatestRecord {
                version: *version,
                address: address.clone(),
            }))
    }

    fn replace_all(&mut self, record: &Record) -> IpKeepResult<ReplaceReport> {
        let mut report = ReplaceReport::default();
        let versions: Vec<Version> = self.records.keys().copied().collect();

        for version in versions {
            if self.stuck.contains(&version) {
                report.failures.push(RemovalFailure {
                    name: version.to_string(),
                    reason: "removal refused".to_string(),
                });
            } else {
                self.records.remove(&version);
                report.removed.push(version.to_string());
            }
        }

        self.records
            .insert(record.version, Some(record.address.clone()));
        self.writes += 1;
        Ok(report)
    }
}
