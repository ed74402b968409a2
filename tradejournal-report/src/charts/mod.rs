//! Journal charts as ratatui widgets.
//!
//! The same widgets back both outputs: the interactive viewer draws them
//! into the terminal frame, and [`render_to_text`] draws them into an
//! off-screen buffer that is dumped as plain text for the artifact files.

pub mod bars;
pub mod cumulative;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use tradejournal_core::{AggregateReport, OutputConfig};

use crate::theme::Theme;

pub use bars::{SignedBar, SignedBarChart};
pub use cumulative::CumulativeChart;

/// Shown in place of a plot when there is nothing to draw.
pub const NO_DATA: &str = "No data";

/// The four charts produced for every journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    CumulativePl,
    MonthlyPl,
    BestDays,
    TopInstruments,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::CumulativePl,
        ChartKind::MonthlyPl,
        ChartKind::BestDays,
        ChartKind::TopInstruments,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::CumulativePl => "Cumulative P/L",
            ChartKind::MonthlyPl => "Monthly P/L",
            ChartKind::BestDays => "Best Days",
            ChartKind::TopInstruments => "Top Instruments",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::CumulativePl => "cumulative_pl.txt",
            ChartKind::MonthlyPl => "monthly_pl.txt",
            ChartKind::BestDays => "best_days.txt",
            ChartKind::TopInstruments => "top_instruments.txt",
        }
    }

    /// Bars for the bar-chart kinds; `None` for the line chart.
    pub fn bars(self, report: &AggregateReport) -> Option<Vec<SignedBar>> {
        let bars = match self {
            ChartKind::CumulativePl => return None,
            ChartKind::MonthlyPl => report
                .monthly_pl
                .iter()
                .map(|m| SignedBar::new(m.month.to_string(), m.profit_loss))
                .collect(),
            ChartKind::BestDays => report
                .best_days
                .iter()
                .map(|d| SignedBar::new(d.date.format("%Y-%m-%d").to_string(), d.profit_loss))
                .collect(),
            ChartKind::TopInstruments => report
                .top_instruments
                .iter()
                .map(|i| SignedBar::new(i.instrument.clone(), i.profit_loss))
                .collect(),
        };
        Some(bars)
    }
}

/// Dimensions of an off-screen chart in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u16,
    pub height: u16,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for ChartSize {
    fn from(output: &OutputConfig) -> Self {
        Self {
            width: output.chart_width,
            height: output.chart_height,
        }
    }
}

impl ChartSize {
    /// Grow the height so a bar chart shows every bar (one row each plus
    /// the border).
    pub fn fit_rows(self, rows: usize) -> Self {
        let needed = u16::try_from(rows.saturating_add(2)).unwrap_or(u16::MAX);
        Self {
            width: self.width,
            height: self.height.max(needed),
        }
    }
}

/// Any of the four journal charts, chosen at runtime.
pub struct JournalChart<'a> {
    kind: ChartKind,
    report: &'a AggregateReport,
    theme: &'a Theme,
}

impl<'a> JournalChart<'a> {
    pub fn new(kind: ChartKind, report: &'a AggregateReport, theme: &'a Theme) -> Self {
        Self {
            kind,
            report,
            theme,
        }
    }
}

impl<'a> Widget for JournalChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.kind.bars(self.report) {
            None => CumulativeChart::new(&self.report.cumulative_pl, self.theme).render(area, buf),
            Some(bars) => {
                SignedBarChart::new(self.kind.title(), &bars, self.theme).render(area, buf)
            }
        }
    }
}

/// Render one chart to text at a size that fits all of its bars.
pub fn chart_text(kind: ChartKind, report: &AggregateReport, size: ChartSize) -> String {
    let size = match kind.bars(report) {
        Some(bars) => size.fit_rows(bars.len()),
        None => size,
    };
    let theme = Theme::default();
    render_to_text(JournalChart::new(kind, report, &theme), size)
}

/// Draw a widget into an off-screen buffer and return its glyphs, one
/// line per row with trailing blanks trimmed.
pub fn render_to_text<W: Widget>(widget: W, size: ChartSize) -> String {
    let area = Rect::new(0, 0, size.width, size.height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_lines(&buf).join("\n") + "\n"
}

fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol()))
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}
