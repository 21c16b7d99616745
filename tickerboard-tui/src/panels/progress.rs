//! Progress panel - how far into the contest window we are

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Widget},
};
use tickerboard_core::Progress;

use crate::theme::Theme;

pub struct ProgressPanel<'a> {
    title: &'a str,
    progress: &'a Progress,
    theme: &'a Theme,
}

impl<'a> ProgressPanel<'a> {
    pub fn new(title: &'a str, progress: &'a Progress, theme: &'a Theme) -> Self {
        Self {
            title,
            progress,
            theme,
        }
    }

    /// Gauge ratio; before the start date the bar stays empty.
    fn ratio(&self) -> f64 {
        self.progress.fraction.clamp(0.0, 1.0)
    }

    /// Positive once the end date is reached, accent until then.
    fn gauge_color(&self) -> Color {
        if self.progress.is_complete() {
            self.theme.positive
        } else {
            self.theme.accent
        }
    }

    fn caption(&self) -> String {
        format!(
            "{} ({:.0}%)",
            self.progress.label(),
            self.progress.percent()
        )
    }
}

impl<'a> Widget for ProgressPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(self.theme.header())
            .borders(Borders::ALL)
            .border_style(self.theme.border(true))
            .style(Style::default().bg(self.theme.background));

        let color = self.gauge_color();

        Gauge::default()
            .block(block)
            .gauge_style(
                Style::default()
                    .fg(color)
                    .bg(self.theme.background)
                    .add_modifier(Modifier::BOLD),
            )
            .ratio(self.ratio())
            .label(self.caption())
            .render(area, buf);
    }
}
