//! Signed horizontal bar chart
//!
//! One row per bar:
//! - Label column (truncated to a fixed width)
//! - Plot area split at a zero axis: gains grow right, losses grow left
//! - Right-aligned signed value

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use super::NO_DATA;
use crate::theme::Theme;

const MAX_LABEL_WIDTH: usize = 16;
const BAR: &str = "\u{2588}"; // █
const AXIS: &str = "\u{2502}"; // │

/// One labelled value.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedBar {
    pub label: String,
    pub value: f64,
}

impl SignedBar {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Horizontal bars around a zero axis. Bars beyond the visible rows are
/// cut off, so callers size the area to `bars.len() + 2` rows to see all.
pub struct SignedBarChart<'a> {
    title: &'a str,
    bars: &'a [SignedBar],
    theme: &'a Theme,
}

impl<'a> SignedBarChart<'a> {
    pub fn new(title: &'a str, bars: &'a [SignedBar], theme: &'a Theme) -> Self {
        Self { title, bars, theme }
    }
}

impl<'a> Widget for SignedBarChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.neutral))
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        if self.bars.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                NO_DATA,
                Style::default().fg(self.theme.muted),
            );
            return;
        }

        let values: Vec<String> = self.bars.iter().map(|b| format_value(b.value)).collect();
        let label_width = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH) as u16;
        let value_width = values.iter().map(String::len).max().unwrap_or(0) as u16;

        // label, gap, plot, gap, value
        let plot_left = inner.x + label_width + 1;
        let plot_width = inner.width.saturating_sub(label_width + value_width + 2);
        if plot_width < 3 {
            return;
        }

        let max_gain = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);
        let max_loss = self.bars.iter().map(|b| -b.value).fold(0.0, f64::max);
        let axis_offset = axis_offset(max_gain, max_loss, plot_width);
        let axis_x = plot_left + axis_offset;
        let gain_span = plot_width - axis_offset - 1;
        let loss_span = axis_offset;

        let label_style = Style::default().fg(self.theme.text_secondary);
        let axis_style = Style::default().fg(self.theme.muted);

        let rows = self.bars.iter().zip(&values).take(inner.height as usize);
        for (row, (bar, value)) in rows.enumerate() {
            let y = inner.y + row as u16;
            let bar_style = Style::default().fg(self.theme.pnl_color(bar.value));

            let label: String = bar.label.chars().take(label_width as usize).collect();
            buf.set_string(inner.x, y, &label, label_style);
            buf.set_string(axis_x, y, AXIS, axis_style);

            if bar.value > 0.0 {
                for i in 0..scaled(bar.value, max_gain, gain_span) {
                    buf.set_string(axis_x + 1 + i, y, BAR, bar_style);
                }
            } else if bar.value < 0.0 {
                for i in 0..scaled(-bar.value, max_loss, loss_span) {
                    buf.set_string(axis_x - 1 - i, y, BAR, bar_style);
                }
            }

            let value_x = inner.right().saturating_sub(value.len() as u16);
            buf.set_string(value_x, y, value, bar_style);
        }
    }
}

fn format_value(value: f64) -> String {
    format!("{:+.2}", value)
}

/// Column of the zero axis inside a plot of `width` cells.
///
/// All gains: axis on the left edge. All losses: right edge. Mixed: split
/// in proportion to the largest gain and the largest loss, keeping at
/// least one cell on each side.
fn axis_offset(max_gain: f64, max_loss: f64, width: u16) -> u16 {
    if max_loss <= 0.0 {
        return 0;
    }
    if max_gain <= 0.0 {
        return width - 1;
    }
    let frac = max_loss / (max_gain + max_loss);
    let offset = (frac * (width - 1) as f64).round() as u16;
    offset.clamp(1, width - 2)
}

/// Bar length in cells. Any non-zero value gets at least one cell.
fn scaled(value: f64, max: f64, span: u16) -> u16 {
    if max <= 0.0 || span == 0 {
        return 0;
    }
    ((value / max * span as f64).round() as u16).clamp(1, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::test_support::{buffer_text, row_cells};

    fn render(bars: &[SignedBar], width: u16, height: u16) -> Buffer {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        SignedBarChart::new("Top Instruments", bars, &theme).render(area, &mut buf);
        buf
    }

    /// Cells strictly inside the border on row `y`.
    fn inner_row(buf: &Buffer, y: u16) -> Vec<String> {
        let cells = row_cells(buf, y);
        cells[1..cells.len() - 1].to_vec()
    }

    #[test]
    fn test_mixed_values_split_around_axis() {
        let bars = vec![SignedBar::new("EURUSD", 180.0), SignedBar::new("GBPUSD", -40.0)];
        let buf = render(&bars, 60, 4);

        let gain = inner_row(&buf, 1);
        let loss = inner_row(&buf, 2);
        let axis = gain.iter().position(|c| c == AXIS).unwrap();
        assert_eq!(loss.iter().position(|c| c == AXIS), Some(axis));

        assert_eq!(gain[axis + 1], BAR);
        assert_ne!(gain[axis - 1], BAR);
        assert_eq!(loss[axis - 1], BAR);
        assert_ne!(loss[axis + 1], BAR);

        let gain_len = gain.iter().filter(|c| *c == BAR).count();
        let loss_len = loss.iter().filter(|c| *c == BAR).count();
        assert!(gain_len > loss_len);
    }

    #[test]
    fn test_labels_and_values_are_printed() {
        let bars = vec![SignedBar::new("EURUSD", 180.0), SignedBar::new("GBPUSD", -40.0)];
        let text = buffer_text(&render(&bars, 60, 4));
        assert!(text.contains("Top Instruments"));
        assert!(text.contains("EURUSD"));
        assert!(text.contains("+180.00"));
        assert!(text.contains("-40.00"));
    }

    #[test]
    fn test_all_gains_put_axis_on_left_edge() {
        let bars = vec![SignedBar::new("2024-01", 80.0), SignedBar::new("2024-02", 60.0)];
        let buf = render(&bars, 50, 4);
        let row = inner_row(&buf, 1);
        // label (7) + gap
        assert_eq!(row[8], AXIS);
    }

    #[test]
    fn test_empty_renders_no_data() {
        let text = buffer_text(&render(&[], 40, 5));
        assert!(text.contains(NO_DATA));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let bars = vec![SignedBar::new("EURUSD", 1.0)];
        render(&bars, 4, 2);
        render(&bars, 12, 3);
        render(&bars, 2, 10);
    }

    #[test]
    fn test_zero_value_draws_no_bar() {
        let bars = vec![SignedBar::new("FLAT", 0.0), SignedBar::new("UP", 10.0)];
        let buf = render(&bars, 40, 4);
        assert!(!inner_row(&buf, 1).iter().any(|c| c == BAR));
        assert!(inner_row(&buf, 2).iter().any(|c| c == BAR));
    }

    #[test]
    fn test_axis_offset_bounds() {
        assert_eq!(axis_offset(10.0, 0.0, 20), 0);
        assert_eq!(axis_offset(0.0, 10.0, 20), 19);
        assert_eq!(axis_offset(1000.0, 0.001, 20), 1);
        assert_eq!(axis_offset(0.001, 1000.0, 20), 18);
    }
}
