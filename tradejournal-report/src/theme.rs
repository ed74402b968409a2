//! Colour tokens for journal charts.
//!
//! Colours only matter for the interactive viewer; text artifacts keep
//! the glyphs and drop the styling.
//!
//! # Palette
//! - **Background**: deep charcoal
//! - **Accent**: cyan (cumulative curve, focus)
//! - **Positive**: green (profitable bars)
//! - **Negative**: pink (losing bars)
//! - **Muted**: steel blue (axes, empty-state text)

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Green for gains, pink for losses. A flat result reads as a gain.
    pub fn pnl_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    /// Win rate in percent (0-100).
    pub fn win_rate_color(&self, win_rate_pct: f64) -> Color {
        match win_rate_pct {
            w if w >= 60.0 => self.positive,
            w if w >= 50.0 => self.accent,
            w if w >= 40.0 => self.neutral,
            _ => self.warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pnl_color() {
        let theme = Theme::default();
        assert_eq!(theme.pnl_color(120.0), theme.positive);
        assert_eq!(theme.pnl_color(-40.0), theme.negative);
        assert_eq!(theme.pnl_color(0.0), theme.positive);
    }

    #[test]
    fn test_win_rate_color() {
        let theme = Theme::default();
        assert_eq!(theme.win_rate_color(66.7), theme.positive);
        assert_eq!(theme.win_rate_color(55.0), theme.accent);
        assert_eq!(theme.win_rate_color(45.0), theme.neutral);
        assert_eq!(theme.win_rate_color(10.0), theme.warning);
    }
}
