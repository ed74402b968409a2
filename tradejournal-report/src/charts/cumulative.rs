//! Cumulative P/L line chart over close time.

use chrono::DateTime;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use tradejournal_core::CumulativePoint;

use super::NO_DATA;
use crate::theme::Theme;

const HALF_DAY_SECS: f64 = 43_200.0;

pub struct CumulativeChart<'a> {
    points: &'a [CumulativePoint],
    theme: &'a Theme,
}

impl<'a> CumulativeChart<'a> {
    pub fn new(points: &'a [CumulativePoint], theme: &'a Theme) -> Self {
        Self { points, theme }
    }
}

impl<'a> Widget for CumulativeChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            let block = block.title(" Cumulative P/L ");
            let inner = block.inner(area);
            block.render(area, buf);
            if inner.width > 0 && inner.height > 0 {
                buf.set_string(
                    inner.x,
                    inner.y,
                    NO_DATA,
                    Style::default().fg(self.theme.muted),
                );
            }
            return;
        };

        let title = format!(
            " Cumulative P/L | {:+.2} | {} trades ",
            last.cumulative,
            self.points.len()
        );

        let curve: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|p| (epoch_secs(p), p.cumulative))
            .collect();

        let mut x_min = epoch_secs(first);
        let mut x_max = epoch_secs(last);
        if x_max - x_min < 1.0 {
            x_min -= HALF_DAY_SECS;
            x_max += HALF_DAY_SECS;
        }

        // The zero line is always in range so gains and losses read at a glance.
        let y_min = curve.iter().map(|&(_, v)| v).fold(0.0, f64::min);
        let y_max = curve.iter().map(|&(_, v)| v).fold(0.0, f64::max);
        let y_range = y_max - y_min;
        let y_pad = if y_range > 0.0 { y_range * 0.05 } else { 100.0 };
        let y_lower = y_min - y_pad;
        let y_upper = y_max + y_pad;

        let zero_line = [(x_min, 0.0), (x_max, 0.0)];
        let datasets = vec![
            Dataset::default()
                .name("zero")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.muted))
                .data(&zero_line),
            Dataset::default()
                .name("Cumulative P/L")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.accent))
                .data(&curve),
        ];

        let x_labels = vec![
            Span::raw(date_label(x_min)),
            Span::raw(date_label((x_min + x_max) / 2.0)),
            Span::raw(date_label(x_max)),
        ];
        let y_labels = vec![
            Span::raw(format!("{:.0}", y_lower)),
            Span::raw(format!("{:.0}", (y_lower + y_upper) / 2.0)),
            Span::raw(format!("{:.0}", y_upper)),
        ];

        let chart = Chart::new(datasets)
            .block(block.title(title))
            .legend_position(None)
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        "Close time",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        "P/L",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}

fn epoch_secs(point: &CumulativePoint) -> f64 {
    point.timestamp.and_utc().timestamp() as f64
}

fn date_label(secs: f64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
