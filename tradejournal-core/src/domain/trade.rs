//! TradeRecord: one closed trade from the journal export.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Month;

/// Instrument assigned to rows whose export has no instrument value.
pub const UNKNOWN_INSTRUMENT: &str = "UNKNOWN";

/// A single closed trade as loaded from the journal.
///
/// Records are built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// 1-based line in the source file (header is line 1).
    pub line: u64,

    // ── Required ──
    /// When the trade closed.
    pub timestamp: NaiveDateTime,
    pub instrument: String,
    pub profit_loss: f64,

    // ── Optional export columns ──
    pub entry_time: Option<NaiveDateTime>,
    pub size: Option<f64>,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub side: Option<String>,
}

impl TradeRecord {
    pub fn new(
        line: u64,
        timestamp: NaiveDateTime,
        instrument: impl Into<String>,
        profit_loss: f64,
    ) -> Self {
        Self {
            line,
            timestamp,
            instrument: instrument.into(),
            profit_loss,
            entry_time: None,
            size: None,
            entry_price: None,
            exit_price: None,
            side: None,
        }
    }

    /// Calendar date the trade closed on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Calendar month the trade closed in.
    pub fn month(&self) -> Month {
        Month::from_date(self.timestamp.date())
    }

    /// A trade counts as a winner only with strictly positive P/L.
    pub fn is_winner(&self) -> bool {
        self.profit_loss > 0.0
    }

    /// Time in the trade, when the export carries an entry time.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.entry_time.map(|entry| self.timestamp - entry)
    }
}
