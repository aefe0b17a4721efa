// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Address version tracking.
//!
//! ```text
//! candidate ──> Tracker::reconcile
//!                  |
//!            store.latest()
//!                  |
//!     +------------+-------------+
//!     v            v             v
//!   None      same address   different / unreadable
//!     |            |             |
//!  write v1    Unchanged     replace_all(v max+1)
//!  Created     (no mutation) Updated + removal failures
//! ```
//!
//! The tracker takes no locks. Runs against the same store must not overlap.

pub mod memory;
pub mod record;
pub mod store;


use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::IpKeepResult;

use record::{Record, RecordPattern, Version};
use store::{DirectoryStore, RecordStore, RemovalFailure, ReplaceReport};

/// Result of one reconcile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No record existed; the first one was written.
    Created { record: Record },

    /// The latest record already holds the candidate. Nothing was touched.
    Unchanged { record: Record },

    /// The address changed (or the latest record was unreadable). Every old
    /// record was removed where possible and a new one written.
    Updated {
        previous: Option<String>,
        record: Record,
        /// Old records that could not be removed and may linger.
        failures: Vec<RemovalFailure>,
    },
}

impl ReconcileOutcome {
    /// The record that is authoritative after the run.
    #[must_use]
    pub const fn record(&self) -> &Record {
        match self {
            Self::Created { record } | Self::Unchanged { record } | Self::Updated { record, .. } => {
                record
            }
        }
    }

    /// Whether the outcome changes the store. In dry-run mode this is what
    /// would have been written.
    #[must_use]
    pub const fn wrote(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }

    /// Display for an outcome computed in dry-run mode: "would create"
    /// instead of "created".
    #[must_use]
    pub const fn planned(&self) -> Planned<'_> {
        Planned(self)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, created: &str) -> fmt::Result {
        match self {
            Self::Created { record } => write!(
                f,
                "no previous record, {created} version {} with {}",
                record.version, record.address
            ),
            Self::Unchanged { record } => {
                write!(f, "address unchanged ({}), no action taken", record.address)
            }
            Self::Updated {
                previous, record, ..
            } => write!(
                f,
                "address changed from {} to {}, {created} version {}",
                previous.as_deref().unwrap_or("<unreadable>"),
                record.address,
                record.version
            ),
        }
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(f, "created")
    }
}

/// See [`ReconcileOutcome::planned`].
#[derive(Debug, Clone, Copy)]
pub struct Planned<'a>(&'a ReconcileOutcome);

impl fmt::Display for Planned<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.describe(f, "would create")
    }
}

/// Compares candidate addresses against a [`RecordStore`] and keeps it current.
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
    dry_run: bool,
}

impl<S: RecordStore> Tracker<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// In dry-run mode the outcome is computed but the store is never written.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Record `candidate` if it differs from the latest stored address.
    ///
    /// Comparison is exact: case-sensitive, no normalization. Removal failures
    /// are returned in [`ReconcileOutcome::Updated`], not raised.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be enumerated or the new
    /// record cannot be written.
    pub fn reconcile(&mut self, candidate: &str) -> IpKeepResult<ReconcileOutcome> {
        let Some(latest) = self.store.latest()? else {
            let record = Record::new(Version::FIRST, candidate);
            self.apply(&record)?;
            info!(version = %record.version, address = candidate, "created first record");
            return Ok(ReconcileOutcome::Created { record });
        };

        if latest.address.as_deref() == Some(candidate) {
            info!(version = %latest.version, address = candidate, "address unchanged");
            return Ok(ReconcileOutcome::Unchanged {
                record: Record::new(latest.version, candidate),
            });
        }

        let record = Record::new(latest.version.next()?, candidate);
        let report = self.apply(&record)?;
        for failure in &report.failures {
            warn!(name = %failure.name, reason = %failure.reason, "stale record left behind");
        }
        info!(
            old = latest.address.as_deref().unwrap_or("<unreadable>"),
            new = candidate,
            version = %record.version,
            "address changed"
        );

        Ok(ReconcileOutcome::Updated {
            previous: latest.address,
            record,
            failures: report.failures,
        })
    }

    fn apply(&mut self, record: &Record) -> IpKeepResult<ReplaceReport> {
        if self.dry_run {
            debug!(version = %record.version, "dry run, store left untouched");
            return Ok(ReplaceReport::default());
        }
        self.store.replace_all(record)
    }
}

/// Reconcile `candidate` against the default `IP-Public<N>.txt` records in
/// `directory`.
///
/// # Errors
///
/// Returns a `StoreError` if the directory cannot be listed or the new record
/// cannot be written.
pub fn reconcile(directory: &Path, candidate: &str) -> IpKeepResult<ReconcileOutcome> {
    let pattern = RecordPattern::new(
        RecordPattern::DEFAULT_PREFIX,
        RecordPattern::DEFAULT_EXTENSION,
    )?;
    Tracker::new(DirectoryStore::new(directory, pattern)).reconcile(candidate)
}
