//! Metrics aggregation: one pass from trade records to a report.
//!
//! The aggregator sorts once (stable, by close time) and feeds the same
//! chronological view to every rollup, so the cumulative curve, the
//! monthly sums and the rankings all agree on which trades they cover.

pub mod grouping;
pub mod stats;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::AggregateConfig;
use crate::domain::{Month, TradeRecord};

pub use grouping::{
    best_days, daily_pl, instrument_pl, monthly_pl, monthly_summary, size_summary,
    top_instruments, DailyPnl, InstrumentPnl, MonthlyPnl, MonthlySummary, SizeSummary,
};
pub use stats::TradeStats;

/// One step of the cumulative P/L curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub timestamp: NaiveDateTime,
    pub instrument: String,
    /// P/L of the trade closed at this step.
    pub profit_loss: f64,
    /// Running total including this trade.
    pub cumulative: f64,
}

/// Everything derived from one journal. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub cumulative_pl: Vec<CumulativePoint>,
    pub monthly_pl: Vec<MonthlyPnl>,
    pub best_days: Vec<DailyPnl>,
    pub top_instruments: Vec<InstrumentPnl>,
    pub stats: TradeStats,
    pub monthly_summary: Vec<MonthlySummary>,
    pub size_summary: Vec<SizeSummary>,
}

impl AggregateReport {
    /// Last value of the cumulative curve; 0.0 for an empty journal.
    pub fn final_pl(&self) -> f64 {
        self.cumulative_pl.last().map_or(0.0, |p| p.cumulative)
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative_pl.is_empty()
    }

    /// Monthly P/L as a month → sum map.
    pub fn monthly_map(&self) -> BTreeMap<Month, f64> {
        self.monthly_pl
            .iter()
            .map(|m| (m.month, m.profit_loss))
            .collect()
    }
}

/// Builds an [`AggregateReport`] with configured ranking sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregator {
    top_days: usize,
    top_instruments: Option<usize>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(&AggregateConfig::default())
    }
}

impl Aggregator {
    pub fn new(config: &AggregateConfig) -> Self {
        Self {
            top_days: config.top_days,
            top_instruments: config.top_instruments,
        }
    }

    /// Compute every rollup. An empty slice gives an empty report.
    pub fn aggregate(&self, records: &[TradeRecord]) -> AggregateReport {
        let ordered = chronological(records);
        debug!(
            trades = ordered.len(),
            top_days = self.top_days,
            "aggregating journal"
        );

        AggregateReport {
            cumulative_pl: cumulative_pl(&ordered),
            monthly_pl: monthly_pl(&ordered),
            best_days: best_days(&ordered, self.top_days),
            top_instruments: top_instruments(&ordered, self.top_instruments),
            stats: TradeStats::compute(records),
            monthly_summary: monthly_summary(&ordered),
            size_summary: size_summary(&ordered),
        }
    }
}

/// Records ordered by close time; equal timestamps keep their input order.
pub fn chronological(records: &[TradeRecord]) -> Vec<&TradeRecord> {
    let mut ordered: Vec<&TradeRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.timestamp);
    ordered
}

/// In-place stable sort by close time.
pub fn sort_chronologically(records: &mut [TradeRecord]) {
    records.sort_by_key(|r| r.timestamp);
}

/// Running sum over records that are already in chronological order.
pub fn cumulative_pl(ordered: &[&TradeRecord]) -> Vec<CumulativePoint> {
    let mut running = 0.0;
    ordered
        .iter()
        .map(|r| {
            running += r.profit_loss;
            CumulativePoint {
                timestamp: r.timestamp,
                instrument: r.instrument.clone(),
                profit_loss: r.profit_loss,
                cumulative: running,
            }
        })
        .collect()
}
