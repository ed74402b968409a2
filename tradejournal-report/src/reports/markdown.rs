//! Markdown report generator.

use super::money;
use crate::charts::ChartKind;
use crate::journal::JournalReport;

pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    pub fn generate(&self, report: &JournalReport<'_>) -> String {
        let aggregate = report.aggregate;
        let stats = &aggregate.stats;

        let mut md = String::from("# Trade Journal Report\n\n");
        if let Some(source) = report.source() {
            md.push_str(&format!("Input: `{}`\n\n", source.display()));
        }
        if let Some(hash) = report.dataset_hash() {
            md.push_str(&format!("Dataset hash: `{}`\n\n", hash));
        }
        md.push_str(&format!(
            "Generated: {}\n\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str(&format!(
            "## Summary\n\
- Trades: {}\n\
- Winning: {}\n\
- Losing: {}\n\
- Win Rate: {:.2}%\n\
- Total P&L: {}\n\
- Average P&L: {}\n",
            stats.total_trades,
            stats.winning_trades,
            stats.losing_trades,
            stats.win_rate_pct,
            money(stats.total_pnl),
            money(stats.average_pnl)
        ));
        if stats.total_trades > 0 {
            md.push_str(&format!(
                "- Best Trade: {}\n- Worst Trade: {}\n",
                money(stats.best_trade),
                money(stats.worst_trade)
            ));
        }

        if !aggregate.monthly_summary.is_empty() {
            md.push_str("\n## Monthly Performance\n\n");
            md.push_str("| Month | Total | Average | Trades | Win Rate |\n");
            md.push_str("|-------|-------|---------|--------|----------|\n");
            for row in &aggregate.monthly_summary {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {:.1}% |\n",
                    row.month,
                    money(row.total_pnl),
                    money(row.average_pnl),
                    row.trades,
                    row.win_rate_pct
                ));
            }
        }

        if !aggregate.best_days.is_empty() {
            md.push_str("\n## Best Days\n\n");
            md.push_str("| Rank | Date | P&L |\n");
            md.push_str("|------|------|-----|\n");
            for (i, day) in aggregate.best_days.iter().enumerate() {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    i + 1,
                    day.date,
                    money(day.profit_loss)
                ));
            }
        }

        if !aggregate.top_instruments.is_empty() {
            md.push_str("\n## Instruments\n\n");
            md.push_str("| Rank | Instrument | P&L |\n");
            md.push_str("|------|------------|-----|\n");
            for (i, row) in aggregate.top_instruments.iter().enumerate() {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    i + 1,
                    table_cell(&row.instrument),
                    money(row.profit_loss)
                ));
            }
        }

        if !aggregate.size_summary.is_empty() {
            md.push_str("\n## Trade Size Impact\n\n");
            md.push_str("| Size | Avg P&L | Trades |\n");
            md.push_str("|------|---------|--------|\n");
            for row in &aggregate.size_summary {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    row.size,
                    money(row.average_pnl),
                    row.trades
                ));
            }
        }

        let skipped = report.skipped();
        if !skipped.is_empty() {
            md.push_str(&format!(
                "\n## Skipped Rows\n\n{} row(s) were excluded:\n\n",
                skipped.len()
            ));
            for warning in skipped {
                md.push_str(&format!("- line {}: {}\n", warning.line, warning.issue));
            }
        }

        md.push_str("\n## Charts\n\n");
        for kind in ChartKind::ALL {
            md.push_str(&format!("- {}: `{}`\n", kind.title(), kind.file_name()));
        }

        md
    }
}

/// Escape text for a table cell so it cannot open a new column or row.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
