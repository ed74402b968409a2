//! Plain-text console report, printed by the CLI after loading.

use chrono::Duration;

use super::money;
use crate::journal::JournalReport;

const PREVIEW_ROWS: usize = 5;
const MAX_SKIPPED_LISTED: usize = 10;

pub struct ConsoleReportGenerator;

impl ConsoleReportGenerator {
    pub fn generate(&self, report: &JournalReport<'_>) -> String {
        let aggregate = report.aggregate;
        let stats = &aggregate.stats;
        let mut out = String::new();

        if let Some(journal) = report.journal {
            let source = report
                .source()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<memory>".to_string());
            out.push_str(&format!(
                "Journal: {} ({} rows, {} loaded, {} skipped)\n",
                source,
                journal.columns.total_rows,
                journal.records.len(),
                journal.skipped_count()
            ));

            out.push_str("\nColumns:\n");
            for assignment in &journal.columns.assignments {
                out.push_str(&format!(
                    "  {:<14} <- {}\n",
                    assignment.role.to_string(),
                    assignment.header
                ));
            }

            out.push_str("\nMissing values per column:\n");
            for nulls in &journal.columns.empty_cells {
                out.push_str(&format!("  {:<20} {}\n", nulls.column, nulls.empty));
            }

            if !journal.records.is_empty() {
                out.push_str("\nFirst trades:\n");
                out.push_str(&format!(
                    "  {:>5}  {:<19}  {:<12}  {:<5}  {:>6}  {:>10}  {:>10}  {:>7}  {:>12}\n",
                    "line", "closed", "instrument", "side", "size", "entry", "exit", "held", "P/L"
                ));
                for record in journal.records.iter().take(PREVIEW_ROWS) {
                    out.push_str(&format!(
                        "  {:>5}  {:<19}  {:<12}  {:<5}  {:>6}  {:>10}  {:>10}  {:>7}  {:>12}\n",
                        record.line,
                        record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                        record.instrument,
                        record.side.as_deref().unwrap_or("-"),
                        optional(record.size),
                        optional(record.entry_price),
                        optional(record.exit_price),
                        held(record.duration()),
                        money(record.profit_loss)
                    ));
                }
            }
            out.push('\n');
        }

        out.push_str(&format!("Total trades: {}\n", stats.total_trades));
        out.push_str(&format!("Winning trades: {}\n", stats.winning_trades));
        out.push_str(&format!("Losing trades: {}\n", stats.losing_trades));
        out.push_str(&format!("Win rate: {:.2}%\n", stats.win_rate_pct));
        out.push_str(&format!("Total P&L: {}\n", money(stats.total_pnl)));
        out.push_str(&format!(
            "Average P&L per trade: {}\n",
            money(stats.average_pnl)
        ));
        if stats.total_trades > 0 {
            out.push_str(&format!("Best trade: {}\n", money(stats.best_trade)));
            out.push_str(&format!("Worst trade: {}\n", money(stats.worst_trade)));
        }

        out.push_str("\nTrade Size Impact on P&L:\n");
        if aggregate.size_summary.is_empty() {
            out.push_str("  (no size column)\n");
        } else {
            out.push_str(&format!(
                "  {:>10}  {:>12}  {:>6}\n",
                "size", "avg P&L", "trades"
            ));
            for row in &aggregate.size_summary {
                out.push_str(&format!(
                    "  {:>10}  {:>12}  {:>6}\n",
                    row.size,
                    money(row.average_pnl),
                    row.trades
                ));
            }
        }

        out.push_str("\nMonthly Performance Summary:\n");
        out.push_str(&format!(
            "  {:<7}  {:>12}  {:>12}  {:>6}  {:>9}\n",
            "month", "total", "average", "trades", "win rate"
        ));
        for row in &aggregate.monthly_summary {
            out.push_str(&format!(
                "  {:<7}  {:>12}  {:>12}  {:>6}  {:>8.2}%\n",
                row.month.to_string(),
                money(row.total_pnl),
                money(row.average_pnl),
                row.trades,
                row.win_rate_pct
            ));
        }

        out.push_str(&format!(
            "\nBest Performing Days (Top {}):\n",
            aggregate.best_days.len()
        ));
        for day in &aggregate.best_days {
            out.push_str(&format!("  {}  {:>12}\n", day.date, money(day.profit_loss)));
        }

        out.push_str("\nMost Profitable Instruments:\n");
        for row in &aggregate.top_instruments {
            out.push_str(&format!(
                "  {:<12}  {:>12}\n",
                row.instrument,
                money(row.profit_loss)
            ));
        }

        let skipped = report.skipped();
        if !skipped.is_empty() {
            out.push_str(&format!("\nSkipped rows: {}\n", skipped.len()));
            for warning in skipped.iter().take(MAX_SKIPPED_LISTED) {
                out.push_str(&format!("  line {}: {}\n", warning.line, warning.issue));
            }
            if skipped.len() > MAX_SKIPPED_LISTED {
                out.push_str(&format!(
                    "  ... and {} more\n",
                    skipped.len() - MAX_SKIPPED_LISTED
                ));
            }
        }

        out
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Time in the trade as `45m`, `1h30m` or `2d03h`. Entries after the exit
/// show as `-`.
fn held(duration: Option<Duration>) -> String {
    let Some(minutes) = duration.map(|d| d.num_minutes()).filter(|m| *m >= 0) else {
        return "-".to_string();
    };
    match minutes {
        m if m >= 24 * 60 => format!("{}d{:02}h", m / (24 * 60), m % (24 * 60) / 60),
        m if m >= 60 => format!("{}h{:02}m", m / 60, m % 60),
        m => format!("{m}m"),
    }
}
