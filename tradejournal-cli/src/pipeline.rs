//! Loader → Aggregator → Renderer, once, for one config.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{info, warn};

use tradejournal_core::{load_trades, AggregateReport, Aggregator, JournalConfig, LoadOptions};
use tradejournal_report::{
    export_report, ArtifactPaths, ChartSize, ConsoleReportGenerator, JournalReport,
};

/// Everything one run produced.
pub struct RunOutcome {
    pub aggregate: AggregateReport,
    /// `None` when artifact writing is disabled.
    pub artifacts: Option<ArtifactPaths>,
}

/// Run the pipeline, writing the console summary to `out` before any
/// artifact is written.
pub fn run(config: &JournalConfig, out: &mut impl Write) -> Result<RunOutcome> {
    let path = &config.input.path;
    let journal = load_trades(path, &LoadOptions::from(&config.input))
        .with_context(|| format!("Failed to load trade journal {}", path.display()))?;
    if journal.skipped_count() > 0 {
        warn!(
            skipped = journal.skipped_count(),
            loaded = journal.records.len(),
            "some rows were skipped"
        );
    }

    let aggregate = Aggregator::new(&config.aggregate).aggregate(&journal.records);
    info!(
        trades = aggregate.stats.total_trades,
        months = aggregate.monthly_pl.len(),
        final_pl = aggregate.final_pl(),
        "journal aggregated"
    );

    let report = JournalReport::new(&aggregate).with_journal(&journal);
    out.write_all(ConsoleReportGenerator.generate(&report).as_bytes())
        .and_then(|()| out.flush())
        .context("Failed to print console summary")?;

    let artifacts = if config.output.write_artifacts {
        let paths = export_report(
            &config.output.dir,
            &report,
            ChartSize::from(&config.output),
            true,
        )
        .context("Failed to write report artifacts")?;
        Some(paths)
    } else {
        None
    };

    Ok(RunOutcome {
        aggregate,
        artifacts,
    })
}
