//! Property tests for aggregation invariants.
//!
//! Uses proptest to verify:
//! 1. Conservation: the cumulative curve ends at the sum of all P/L
//! 2. No loss across grouping: monthly sums add up to the same total
//! 3. Ordering: chronological sort is idempotent and stable
//! 4. Rankings: best days and instruments are descending and bounded
//! 5. Skip counting: every bad timestamp is counted exactly once

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use tradejournal_core::aggregate::{chronological, sort_chronologically};
use tradejournal_core::{read_trades, AggregateConfig, Aggregator, LoadOptions, TradeRecord};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_timestamp() -> impl Strategy<Value = NaiveDateTime> {
    // Two years in 15-minute steps, coarse enough to produce same-day trades.
    (0i64..(2 * 365 * 24 * 4)).prop_map(|quarter_hours| {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::minutes(quarter_hours * 15)
    })
}

fn arb_pnl() -> impl Strategy<Value = f64> {
    (-5000.0..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_instrument() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("EURUSD".to_string()),
        Just("GBPUSD".to_string()),
        Just("USDJPY".to_string()),
        Just("XAUUSD".to_string()),
        Just("AUDUSD".to_string()),
    ]
}

fn arb_journal() -> impl Strategy<Value = Vec<TradeRecord>> {
    prop::collection::vec((arb_timestamp(), arb_instrument(), arb_pnl()), 0..60).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (ts, instrument, pnl))| {
                    TradeRecord::new(i as u64 + 2, ts, instrument, pnl)
                })
                .collect()
        },
    )
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ── 1 & 2. Conservation ──────────────────────────────────────────────

proptest! {
    /// Final cumulative value equals the plain sum of every trade.
    #[test]
    fn cumulative_ends_at_total(journal in arb_journal()) {
        let report = Aggregator::default().aggregate(&journal);
        let total: f64 = journal.iter().map(|r| r.profit_loss).sum();
        prop_assert!(close(report.final_pl(), total));
        prop_assert_eq!(report.cumulative_pl.len(), journal.len());
    }

    /// Monthly rollup neither drops nor double-counts trades.
    #[test]
    fn monthly_sum_matches_cumulative(journal in arb_journal()) {
        let report = Aggregator::default().aggregate(&journal);
        let monthly_total: f64 = report.monthly_pl.iter().map(|m| m.profit_loss).sum();
        prop_assert!(close(monthly_total, report.final_pl()));

        let counted: usize = report.monthly_summary.iter().map(|m| m.trades).sum();
        prop_assert_eq!(counted, journal.len());
    }

    /// Monthly groups come out strictly chronological.
    #[test]
    fn months_are_chronological(journal in arb_journal()) {
        let report = Aggregator::default().aggregate(&journal);
        for pair in report.monthly_pl.windows(2) {
            prop_assert!(pair[0].month < pair[1].month);
        }
    }
}

// ── 3. Ordering ──────────────────────────────────────────────────────

proptest! {
    /// Re-sorting an already sorted journal changes nothing.
    #[test]
    fn chronological_sort_is_idempotent(mut journal in arb_journal()) {
        sort_chronologically(&mut journal);
        let once = journal.clone();
        sort_chronologically(&mut journal);
        prop_assert_eq!(once, journal);
    }

    /// Equal timestamps keep their original (line) order.
    #[test]
    fn chronological_sort_is_stable(journal in arb_journal()) {
        let ordered = chronological(&journal);
        for pair in ordered.windows(2) {
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
            if pair[0].timestamp == pair[1].timestamp {
                prop_assert!(pair[0].line < pair[1].line);
            }
        }
    }
}

// ── 4. Rankings ──────────────────────────────────────────────────────

proptest! {
    /// Best days are descending and never exceed top-N.
    #[test]
    fn best_days_descending_and_bounded(journal in arb_journal(), top_days in 1usize..10) {
        let config = AggregateConfig { top_days, top_instruments: None };
        let report = Aggregator::new(&config).aggregate(&journal);
        prop_assert!(report.best_days.len() <= top_days);
        for pair in report.best_days.windows(2) {
            prop_assert!(pair[0].profit_loss >= pair[1].profit_loss);
            if pair[0].profit_loss == pair[1].profit_loss {
                prop_assert!(pair[0].date < pair[1].date);
            }
        }
    }

    /// Instruments are descending and never exceed top-N.
    #[test]
    fn instruments_descending_and_bounded(journal in arb_journal(), top in 1usize..6) {
        let config = AggregateConfig { top_days: 5, top_instruments: Some(top) };
        let report = Aggregator::new(&config).aggregate(&journal);
        prop_assert!(report.top_instruments.len() <= top);
        for pair in report.top_instruments.windows(2) {
            prop_assert!(pair[0].profit_loss >= pair[1].profit_loss);
        }
    }

    /// Without a limit every instrument is ranked and the ranking conserves P/L.
    #[test]
    fn unbounded_instruments_conserve_total(journal in arb_journal()) {
        let report = Aggregator::default().aggregate(&journal);
        let ranked_total: f64 = report.top_instruments.iter().map(|i| i.profit_loss).sum();
        prop_assert!(close(ranked_total, report.final_pl()));
    }
}

// ── 5. Skip counting ─────────────────────────────────────────────────

proptest! {
    /// Each unparseable timestamp is excluded and counted exactly once.
    #[test]
    fn bad_timestamps_counted_once(
        good in prop::collection::vec(arb_pnl(), 1..20),
        bad in prop::collection::vec(arb_pnl(), 0..10),
    ) {
        let mut csv = String::from("Exit Time,Symbol,P&L\n");
        for (i, pnl) in good.iter().enumerate() {
            csv.push_str(&format!("2024-01-{:02} 12:00:00,EURUSD,{pnl}\n", i % 28 + 1));
        }
        for pnl in &bad {
            csv.push_str(&format!("not-a-date,EURUSD,{pnl}\n"));
        }

        let journal = read_trades(csv.as_bytes(), &LoadOptions::default()).unwrap();
        prop_assert_eq!(journal.records.len(), good.len());
        prop_assert_eq!(journal.skipped_count(), bad.len());

        let report = Aggregator::default().aggregate(&journal.records);
        let expected: f64 = good.iter().sum();
        prop_assert!(close(report.final_pl(), expected));
    }
}
