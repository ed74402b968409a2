//! Tabular exports (CSV).
//!
//! Headers are written explicitly so an empty table still yields a
//! readable file.

use anyhow::{Context, Result};
use std::path::Path;

use tradejournal_core::aggregate::{DailyPnl, InstrumentPnl, MonthlySummary, SizeSummary};
use tradejournal_core::{CumulativePoint, RowParseWarning};

fn write_table<I, R>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_cumulative_csv(path: &Path, points: &[CumulativePoint]) -> Result<()> {
    write_table(
        path,
        &["timestamp", "instrument", "profit_loss", "cumulative"],
        points.iter().map(|p| {
            [
                p.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                p.instrument.clone(),
                format!("{:.2}", p.profit_loss),
                format!("{:.2}", p.cumulative),
            ]
        }),
    )
}

pub fn write_monthly_csv(path: &Path, months: &[MonthlySummary]) -> Result<()> {
    write_table(
        path,
        &["month", "total_pnl", "average_pnl", "trades", "win_rate_pct"],
        months.iter().map(|m| {
            [
                m.month.to_string(),
                format!("{:.2}", m.total_pnl),
                format!("{:.2}", m.average_pnl),
                m.trades.to_string(),
                format!("{:.2}", m.win_rate_pct),
            ]
        }),
    )
}

pub fn write_best_days_csv(path: &Path, days: &[DailyPnl]) -> Result<()> {
    write_table(
        path,
        &["rank", "date", "profit_loss"],
        days.iter().enumerate().map(|(i, d)| {
            [
                (i + 1).to_string(),
                d.date.to_string(),
                format!("{:.2}", d.profit_loss),
            ]
        }),
    )
}

pub fn write_instruments_csv(path: &Path, instruments: &[InstrumentPnl]) -> Result<()> {
    write_table(
        path,
        &["rank", "instrument", "profit_loss"],
        instruments.iter().enumerate().map(|(i, row)| {
            [
                (i + 1).to_string(),
                row.instrument.clone(),
                format!("{:.2}", row.profit_loss),
            ]
        }),
    )
}

pub fn write_size_csv(path: &Path, sizes: &[SizeSummary]) -> Result<()> {
    write_table(
        path,
        &["size", "average_pnl", "trades"],
        sizes.iter().map(|s| {
            [
                s.size.to_string(),
                format!("{:.2}", s.average_pnl),
                s.trades.to_string(),
            ]
        }),
    )
}

pub fn write_skipped_csv(path: &Path, skipped: &[RowParseWarning]) -> Result<()> {
    write_table(
        path,
        &["line", "reason"],
        skipped
            .iter()
            .map(|w| [w.line.to_string(), w.issue.to_string()]),
    )
}
