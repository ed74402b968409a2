//! Report manifest export (JSON).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tradejournal_core::loader::ColumnAssignment;
use tradejournal_core::TradeStats;

use crate::journal::JournalReport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportManifest {
    pub generated_at: DateTime<Utc>,
    pub input: Option<PathBuf>,
    /// BLAKE3 of the raw input bytes.
    pub dataset_hash: Option<String>,
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
    pub columns: Vec<ColumnAssignment>,
    pub final_pl: f64,
    pub stats: TradeStats,
}

impl ReportManifest {
    pub fn from_report(report: &JournalReport<'_>) -> Self {
        let loaded_rows = report.aggregate.stats.total_trades;
        let skipped_rows = report.skipped().len();
        let (total_rows, columns) = match report.journal {
            Some(journal) => (
                journal.columns.total_rows,
                journal.columns.assignments.clone(),
            ),
            None => (loaded_rows + skipped_rows, Vec::new()),
        };
        Self {
            generated_at: report.generated_at,
            input: report.source().map(Path::to_path_buf),
            dataset_hash: report.dataset_hash().map(str::to_string),
            total_rows,
            loaded_rows,
            skipped_rows,
            columns,
            final_pl: report.aggregate.final_pl(),
            stats: report.aggregate.stats,
        }
    }
}

pub fn write_manifest(path: &Path, report: &JournalReport<'_>) -> Result<()> {
    let manifest = ReportManifest::from_report(report);
    let json =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize report manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    Ok(())
}
