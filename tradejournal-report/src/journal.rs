//! The renderer's input: an aggregate report plus where it came from.

use chrono::{DateTime, Utc};
use std::path::Path;

use tradejournal_core::{AggregateReport, LoadedJournal, RowParseWarning};

/// Everything a renderer needs for one run.
///
/// Charts only look at `aggregate`. The manifest and the written reports
/// also use the load diagnostics when a journal is attached.
#[derive(Debug, Clone, Copy)]
pub struct JournalReport<'a> {
    pub aggregate: &'a AggregateReport,
    pub journal: Option<&'a LoadedJournal>,
    pub generated_at: DateTime<Utc>,
}

impl<'a> JournalReport<'a> {
    pub fn new(aggregate: &'a AggregateReport) -> Self {
        Self {
            aggregate,
            journal: None,
            generated_at: Utc::now(),
        }
    }

    pub fn with_journal(mut self, journal: &'a LoadedJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn source(&self) -> Option<&'a Path> {
        self.journal.and_then(|j| j.source.as_deref())
    }

    pub fn dataset_hash(&self) -> Option<&'a str> {
        self.journal.map(|j| j.dataset_hash.as_str())
    }

    pub fn skipped(&self) -> &'a [RowParseWarning] {
        self.journal.map_or(&[], |j| j.skipped.as_slice())
    }
}
