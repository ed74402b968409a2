//! Chart export (plain text renders of the ratatui widgets).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use tradejournal_core::AggregateReport;

use crate::charts::{chart_text, ChartKind, ChartSize};

/// Write all four charts into `dir`, returning their paths in
/// [`ChartKind::ALL`] order.
pub fn write_charts(dir: &Path, report: &AggregateReport, size: ChartSize) -> Result<Vec<PathBuf>> {
    ChartKind::ALL
        .iter()
        .map(|&kind| {
            let path = dir.join(kind.file_name());
            std::fs::write(&path, chart_text(kind, report, size))
                .with_context(|| format!("Failed to write chart {}", path.display()))?;
            Ok(path)
        })
        .collect()
}
