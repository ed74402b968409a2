//! Export orchestrator for artifacts and reports.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::artifacts::{ArtifactManager, ArtifactPaths};
use crate::charts::ChartSize;
use crate::journal::JournalReport;
use crate::reports::MarkdownReportGenerator;

pub fn export_report(
    output_dir: impl AsRef<Path>,
    report: &JournalReport<'_>,
    size: ChartSize,
    include_markdown: bool,
) -> Result<ArtifactPaths> {
    let manager = ArtifactManager::new(output_dir)?;
    let mut paths = manager.save_report(report, size)?;

    if include_markdown {
        let report_path = manager.output_dir().join("report.md");
        let markdown = MarkdownReportGenerator.generate(report);
        std::fs::write(&report_path, markdown)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
        paths.report_markdown = Some(report_path);
    }

    info!(
        dir = %manager.output_dir().display(),
        files = paths.all().len(),
        "report exported"
    );
    Ok(paths)
}
