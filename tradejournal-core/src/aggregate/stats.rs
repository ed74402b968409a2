//! Whole-journal trade statistics.

use serde::{Deserialize, Serialize};

use crate::domain::TradeRecord;

/// Headline numbers for the whole journal.
///
/// A trade with P/L of exactly zero counts as a loss, so
/// `winning_trades + losing_trades == total_trades` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage of trades with P/L > 0 (0-100).
    pub win_rate_pct: f64,
    pub total_pnl: f64,
    pub average_pnl: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
}

impl TradeStats {
    pub fn compute(records: &[TradeRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let total_trades = records.len();
        let winning_trades = records.iter().filter(|r| r.is_winner()).count();
        let total_pnl: f64 = records.iter().map(|r| r.profit_loss).sum();
        let best_trade = records
            .iter()
            .map(|r| r.profit_loss)
            .fold(f64::NEG_INFINITY, f64::max);
        let worst_trade = records
            .iter()
            .map(|r| r.profit_loss)
            .fold(f64::INFINITY, f64::min);

        Self {
            total_trades,
            winning_trades,
            losing_trades: total_trades - winning_trades,
            win_rate_pct: win_rate_pct(winning_trades, total_trades),
            total_pnl,
            average_pnl: total_pnl / total_trades as f64,
            best_trade,
            worst_trade,
        }
    }
}

/// Winners as a percentage of trades; 0.0 when there are no trades.
pub fn win_rate_pct(winners: usize, trades: usize) -> f64 {
    if trades == 0 {
        return 0.0;
    }
    winners as f64 / trades as f64 * 100.0
}
