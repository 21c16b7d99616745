//! Podium panel - metric cards for the top five picks

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tickerboard_core::transform::podium;
use tickerboard_core::RankedMetric;

use crate::theme::Theme;

/// Number of cards on the podium.
pub const PODIUM_SIZE: usize = 5;

pub struct PodiumPanel<'a> {
    ranking: &'a [RankedMetric],
    theme: &'a Theme,
}

impl<'a> PodiumPanel<'a> {
    pub fn new(ranking: &'a [RankedMetric], theme: &'a Theme) -> Self {
        Self { ranking, theme }
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ... `11th`, `12th`, `13th`, `21st`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

impl<'a> Widget for PodiumPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let top = podium(self.ranking, PODIUM_SIZE);
        if top.is_empty() {
            return;
        }

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, top.len() as u32); top.len()])
            .split(area);

        for (metric, card) in top.iter().zip(cards.iter()) {
            let medal = self.theme.medal_color(metric.rank);
            let block = Block::default()
                .title(format!(" {} ", ordinal(metric.rank)))
                .title_style(Style::default().fg(medal).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(medal))
                .style(Style::default().bg(self.theme.background));

            let lines = vec![
                Line::from(Span::styled(
                    metric.symbol.as_str(),
                    Style::default()
                        .fg(self.theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    metric.name.as_str(),
                    Style::default().fg(self.theme.text_secondary),
                )),
                Line::from(Span::styled(
                    metric.delta(),
                    Style::default()
                        .fg(self.theme.change_color(metric.percent_change))
                        .add_modifier(Modifier::BOLD),
                )),
            ];

            Paragraph::new(lines).block(block).render(*card, buf);
        }
    }
}
