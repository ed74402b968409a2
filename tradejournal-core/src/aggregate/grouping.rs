//! Group-and-sum rollups: per month, per day, per instrument, per size.
//!
//! Every function is pure: records in, rows out. Inputs are expected in
//! chronological order so per-group float sums accumulate in the same
//! order as the cumulative curve.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::stats::win_rate_pct;
use crate::domain::{Month, TradeRecord};

/// Summed P/L for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPnl {
    pub month: Month,
    pub profit_loss: f64,
}

/// Summed P/L for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPnl {
    pub date: NaiveDate,
    pub profit_loss: f64,
}

/// Summed P/L for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentPnl {
    pub instrument: String,
    pub profit_loss: f64,
}

/// Per-month breakdown with trade counts and win rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub total_pnl: f64,
    pub average_pnl: f64,
    pub trades: usize,
    pub win_rate_pct: f64,
}

/// Average result per distinct trade size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSummary {
    pub size: f64,
    pub average_pnl: f64,
    pub trades: usize,
}

/// Sum P/L per key, keys in ascending order.
fn sum_by<K: Ord>(
    records: &[&TradeRecord],
    key: impl Fn(&TradeRecord) -> K,
) -> BTreeMap<K, f64> {
    let mut sums = BTreeMap::new();
    for &record in records {
        *sums.entry(key(record)).or_insert(0.0) += record.profit_loss;
    }
    sums
}

/// Monthly P/L in chronological order.
pub fn monthly_pl(records: &[&TradeRecord]) -> Vec<MonthlyPnl> {
    sum_by(records, TradeRecord::month)
        .into_iter()
        .map(|(month, profit_loss)| MonthlyPnl { month, profit_loss })
        .collect()
}

/// Daily P/L in chronological order (unranked).
pub fn daily_pl(records: &[&TradeRecord]) -> Vec<DailyPnl> {
    sum_by(records, TradeRecord::date)
        .into_iter()
        .map(|(date, profit_loss)| DailyPnl { date, profit_loss })
        .collect()
}

/// Per-instrument P/L in instrument-name order (unranked).
pub fn instrument_pl(records: &[&TradeRecord]) -> Vec<InstrumentPnl> {
    sum_by(records, |r| r.instrument.clone())
        .into_iter()
        .map(|(instrument, profit_loss)| InstrumentPnl {
            instrument,
            profit_loss,
        })
        .collect()
}

/// Best days: descending by P/L, earliest date first on ties.
pub fn best_days(records: &[&TradeRecord], top_n: usize) -> Vec<DailyPnl> {
    let mut days = daily_pl(records);
    days.sort_by(|a, b| rank_desc(a.profit_loss, b.profit_loss).then(a.date.cmp(&b.date)));
    days.truncate(top_n);
    days
}

/// Instruments ranked descending by P/L, name ascending on ties.
/// `None` keeps every instrument.
pub fn top_instruments(records: &[&TradeRecord], top_n: Option<usize>) -> Vec<InstrumentPnl> {
    let mut instruments = instrument_pl(records);
    instruments.sort_by(|a, b| {
        rank_desc(a.profit_loss, b.profit_loss).then_with(|| a.instrument.cmp(&b.instrument))
    });
    if let Some(n) = top_n {
        instruments.truncate(n);
    }
    instruments
}

/// Monthly total, average, count and win rate.
pub fn monthly_summary(records: &[&TradeRecord]) -> Vec<MonthlySummary> {
    let mut groups: BTreeMap<Month, (f64, usize, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.month()).or_insert((0.0, 0, 0));
        entry.0 += record.profit_loss;
        entry.1 += 1;
        if record.is_winner() {
            entry.2 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(month, (total_pnl, trades, winners))| MonthlySummary {
            month,
            total_pnl,
            average_pnl: total_pnl / trades as f64,
            trades,
            win_rate_pct: win_rate_pct(winners, trades),
        })
        .collect()
}

/// Average P/L per trade size, ascending by size.
///
/// Records without a size are left out; an export with no size column
/// yields an empty summary.
pub fn size_summary(records: &[&TradeRecord]) -> Vec<SizeSummary> {
    let mut sized: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|r| r.size.map(|s| (s, r.profit_loss)))
        .collect();
    sized.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out: Vec<SizeSummary> = Vec::new();
    let mut totals: Vec<f64> = Vec::new();
    for (size, pnl) in sized {
        match out.last_mut() {
            Some(last) if last.size == size => {
                last.trades += 1;
                if let Some(total) = totals.last_mut() {
                    *total += pnl;
                }
            }
            _ => {
                out.push(SizeSummary {
                    size,
                    average_pnl: 0.0,
                    trades: 1,
                });
                totals.push(pnl);
            }
        }
    }
    for (summary, total) in out.iter_mut().zip(totals) {
        summary.average_pnl = total / summary.trades as f64;
    }
    out
}

fn rank_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
