//! Migration driver: enumerate → read → classify → collect.
//!
//! The `Migrator` only depends on the `EntrySource` and `EntryReader`
//! traits, so the whole pipeline can run against in-memory fakes.
//! Writing the CSV is left to the caller, which decides what to do with
//! an empty result.

use crate::errors::{MigrateError, Result};
use crate::record::{classify, Record};
use crate::store::{EntryReader, EntrySource};

/// Progress notifications emitted while a migration runs.
#[derive(Debug)]
pub enum MigrationEvent<'a> {
    /// Enumeration finished; `total` entries will be processed.
    Started { total: usize },
    /// About to read `entry`.
    Processing { entry: &'a str },
    /// `entry` produced no content and was skipped.
    Failed {
        entry: &'a str,
        error: &'a MigrateError,
    },
}

/// Outcome of a full migration run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Classified records, in enumeration order.
    pub records: Vec<Record>,
    /// Entries that produced a record.
    pub processed: usize,
    /// Entries found in the store.
    pub total: usize,
    /// Identifiers of entries that could not be read.
    pub failed: Vec<String>,
}

impl MigrationReport {
    /// `processed/total`, as printed in the final summary.
    pub fn summary(&self) -> String {
        format!("{}/{}", self.processed, self.total)
    }
}

/// Drives one migration over a source and a reader.
pub struct Migrator<S, R> {
    source: S,
    reader: R,
}

impl<S: EntrySource, R: EntryReader> Migrator<S, R> {
    pub fn new(source: S, reader: R) -> Self {
        Self { source, reader }
    }

    /// Process every entry once, in order.
    ///
    /// Unreadable entries are reported through `on_event` and skipped; only
    /// a failure to enumerate the source aborts the run.
    pub fn run<F>(&self, mut on_event: F) -> Result<MigrationReport>
    where
        F: FnMut(MigrationEvent<'_>),
    {
        let entries = self.source.entries()?;
        let mut report = MigrationReport {
            total: entries.len(),
            ..MigrationReport::default()
        };

        on_event(MigrationEvent::Started {
            total: report.total,
        });

        for entry in &entries {
            on_event(MigrationEvent::Processing { entry });

            let content = self.reader.read(entry).and_then(|raw| {
                if raw.is_empty() {
                    Err(MigrateError::unreadable(entry, "entry is empty"))
                } else {
                    Ok(raw)
                }
            });

            match content {
                Ok(raw) => {
                    report.records.push(classify(entry, &raw));
                    report.processed += 1;
                }
                Err(error) => {
                    on_event(MigrationEvent::Failed {
                        entry,
                        error: &error,
                    });
                    report.failed.push(entry.clone());
                }
            }
        }

        Ok(report)
    }
}
