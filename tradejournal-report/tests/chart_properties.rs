//! Property tests for the text renders of the journal charts.
//!
//! 1. Any journal renders at any size without panicking
//! 2. Text never spills past the canvas width
//! 3. Bar charts grow to show every bar and print every value

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use tradejournal_core::{AggregateConfig, AggregateReport, Aggregator, TradeRecord};
use tradejournal_report::charts::chart_text;
use tradejournal_report::{ChartKind, ChartSize};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_record() -> impl Strategy<Value = (i64, String, f64)> {
    (
        0i64..(365 * 24),
        prop_oneof![
            Just("EURUSD".to_string()),
            Just("GBPUSD".to_string()),
            Just("XAUUSD".to_string()),
            Just("US30.cash.long-name".to_string()),
        ],
        (-5000.0..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0),
    )
}

fn arb_report() -> impl Strategy<Value = AggregateReport> {
    prop::collection::vec(arb_record(), 0..40).prop_map(|rows| {
        let start: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let records: Vec<TradeRecord> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (hours, instrument, pnl))| {
                TradeRecord::new(i as u64 + 2, start + Duration::hours(hours), instrument, pnl)
            })
            .collect();
        let config = AggregateConfig {
            top_days: 10,
            ..AggregateConfig::default()
        };
        Aggregator::new(&config).aggregate(&records)
    })
}

fn arb_size() -> impl Strategy<Value = ChartSize> {
    (20u16..160, 8u16..50).prop_map(|(width, height)| ChartSize { width, height })
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn renders_fit_the_canvas(report in arb_report(), size in arb_size()) {
        for kind in ChartKind::ALL {
            let text = chart_text(kind, &report, size);
            let lines: Vec<&str> = text.lines().collect();

            prop_assert!(lines.len() >= size.height as usize, "{kind:?} lost rows");
            for line in &lines {
                prop_assert!(
                    line.chars().count() <= size.width as usize,
                    "{kind:?} spilled: {line:?}"
                );
            }
        }
    }

    #[test]
    fn bar_charts_show_every_bar(report in arb_report(), height in 8u16..20) {
        let size = ChartSize { width: 80, height };
        for kind in [ChartKind::MonthlyPl, ChartKind::BestDays, ChartKind::TopInstruments] {
            let bars = kind.bars(&report).unwrap();
            let text = chart_text(kind, &report, size);

            prop_assert_eq!(text.lines().count(), (bars.len() + 2).max(height as usize));
            for bar in &bars {
                let value = format!("{:+.2}", bar.value);
                prop_assert!(text.contains(&value), "{kind:?} missing {value}");
            }
        }
    }
}
