//! Leaderboard panel - picks ranked by percent change since the start
//!
//! Displays:
//! - Rank (medal colored for the top three)
//! - Symbol and company name
//! - Percent change, one decimal

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};
use tickerboard_core::RankedMetric;

use crate::theme::Theme;

pub struct LeaderboardPanel<'a> {
    ranking: &'a [RankedMetric],
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> LeaderboardPanel<'a> {
    pub fn new(ranking: &'a [RankedMetric], scroll: usize, theme: &'a Theme) -> Self {
        Self {
            ranking,
            scroll,
            theme,
        }
    }
}

impl<'a> Widget for LeaderboardPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Ranking ")
            .title_style(self.theme.header())
            .borders(Borders::ALL)
            .border_style(self.theme.border(true))
            .style(Style::default().bg(self.theme.background));

        let header = Row::new(
            ["Rank", "Symbol", "Name", "Change"]
                .into_iter()
                .map(|h| Cell::from(h).style(self.theme.header())),
        )
        .height(1);

        let rows = self.ranking.iter().skip(self.scroll).map(|m| {
            Row::new(vec![
                Cell::from(format!("{}", m.rank)).style(
                    Style::default()
                        .fg(self.theme.medal_color(m.rank))
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(m.symbol.as_str()),
                Cell::from(m.name.as_str()).style(Style::default().fg(self.theme.text_secondary)),
                Cell::from(m.delta())
                    .style(Style::default().fg(self.theme.change_color(m.percent_change))),
            ])
            .style(Style::default().fg(self.theme.text_primary))
        });

        let widths = [
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Min(16),
            Constraint::Length(9),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .render(area, buf);
    }
}
