//! Artifact manager for persisting journal reports.

mod charts;
mod manifest;
mod tables;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::charts::ChartSize;
use crate::journal::JournalReport;

pub use manifest::ReportManifest;

/// Artifact paths returned after export.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub manifest: PathBuf,
    /// Chart text files in `ChartKind::ALL` order.
    pub charts: Vec<PathBuf>,
    pub cumulative_csv: PathBuf,
    pub monthly_csv: PathBuf,
    pub best_days_csv: PathBuf,
    pub instruments_csv: PathBuf,
    pub size_csv: PathBuf,
    pub skipped_csv: PathBuf,
    pub report_markdown: Option<PathBuf>,
}

impl ArtifactPaths {
    pub fn all(&self) -> Vec<&Path> {
        let mut paths = vec![self.manifest.as_path()];
        paths.extend(self.charts.iter().map(PathBuf::as_path));
        paths.extend([
            self.cumulative_csv.as_path(),
            self.monthly_csv.as_path(),
            self.best_days_csv.as_path(),
            self.instruments_csv.as_path(),
            self.size_csv.as_path(),
            self.skipped_csv.as_path(),
        ]);
        paths.extend(self.report_markdown.as_deref());
        paths
    }
}

/// Writes every artifact for a report into one directory.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!(
                "Failed to create artifact output directory {}",
                output_dir.display()
            )
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save charts, manifest and tables. Existing files are overwritten.
    pub fn save_report(&self, report: &JournalReport<'_>, size: ChartSize) -> Result<ArtifactPaths> {
        let dir = &self.output_dir;
        let aggregate = report.aggregate;

        let manifest_path = dir.join("summary.json");
        manifest::write_manifest(&manifest_path, report)?;

        let charts = charts::write_charts(dir, aggregate, size)?;

        let cumulative_csv = dir.join("cumulative_pl.csv");
        tables::write_cumulative_csv(&cumulative_csv, &aggregate.cumulative_pl)?;

        let monthly_csv = dir.join("monthly_summary.csv");
        tables::write_monthly_csv(&monthly_csv, &aggregate.monthly_summary)?;

        let best_days_csv = dir.join("best_days.csv");
        tables::write_best_days_csv(&best_days_csv, &aggregate.best_days)?;

        let instruments_csv = dir.join("top_instruments.csv");
        tables::write_instruments_csv(&instruments_csv, &aggregate.top_instruments)?;

        let size_csv = dir.join("size_summary.csv");
        tables::write_size_csv(&size_csv, &aggregate.size_summary)?;

        let skipped_csv = dir.join("skipped_rows.csv");
        tables::write_skipped_csv(&skipped_csv, report.skipped())?;

        debug!(dir = %dir.display(), charts = charts.len(), "artifacts written");

        Ok(ArtifactPaths {
            manifest: manifest_path,
            charts,
            cumulative_csv,
            monthly_csv,
            best_days_csv,
            instruments_csv,
            size_csv,
            skipped_csv,
            report_markdown: None,
        })
    }
}
