//! Trade Journal Report: the rendering stage.
//!
//! Turns an [`tradejournal_core::AggregateReport`] into:
//! - four chart widgets (cumulative P/L line, monthly / best-day /
//!   instrument bars), drawable in a terminal or dumped to text files
//! - CSV tables, a JSON manifest and a Markdown report
//! - the plain-text console summary printed by the CLI

pub mod artifacts;
pub mod charts;
pub mod export;
pub mod journal;
pub mod reports;
pub mod theme;

pub use artifacts::{ArtifactManager, ArtifactPaths, ReportManifest};
pub use charts::{render_to_text, ChartKind, ChartSize, JournalChart};
pub use export::export_report;
pub use journal::JournalReport;
pub use reports::{ConsoleReportGenerator, MarkdownReportGenerator};
pub use theme::Theme;
