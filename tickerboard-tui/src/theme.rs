//! Parrot/neon theme tokens for the Tickerboard dashboard
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, titles)
//! - **Positive**: Neon green (gains)
//! - **Negative**: Hot pink (losses)
//! - **Warning**: Neon orange (synthetic data, stale output)
//! - **Muted**: Steel blue (secondary text, unset values)
//! - **Medals**: gold / silver / bronze for the podium

use ratatui::style::{Color, Modifier, Style};

/// Line colors for chart series, cycled by column index.
const SERIES: [Color; 10] = [
    Color::Rgb(0, 255, 255),
    Color::Rgb(255, 20, 147),
    Color::Rgb(0, 255, 128),
    Color::Rgb(255, 140, 0),
    Color::Rgb(147, 112, 219),
    Color::Rgb(255, 255, 0),
    Color::Rgb(100, 149, 237),
    Color::Rgb(255, 99, 71),
    Color::Rgb(64, 224, 208),
    Color::Rgb(238, 130, 238),
];

/// Parrot/neon theme
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub gold: Color,
    pub silver: Color,
    pub bronze: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
            gold: Color::Rgb(255, 215, 0),
            silver: Color::Rgb(192, 192, 192),
            bronze: Color::Rgb(205, 127, 50),
        }
    }

    /// Gains green, losses pink. Zero counts as a gain.
    pub fn pnl_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    /// Like [`Theme::pnl_color`], muted when the value is unset.
    pub fn change_color(&self, value: Option<f64>) -> Color {
        value.map_or(self.muted, |v| self.pnl_color(v))
    }

    /// Podium color for a 1-based rank.
    pub fn medal_color(&self, rank: usize) -> Color {
        match rank {
            1 => self.gold,
            2 => self.silver,
            3 => self.bronze,
            _ => self.accent,
        }
    }

    pub fn series_color(&self, index: usize) -> Color {
        SERIES[index % SERIES.len()]
    }

    pub fn border(&self, active: bool) -> Style {
        if active {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
