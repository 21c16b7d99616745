//! Chart panel - percent change since the contest start, one line per pick
//!
//! Lines follow the matrix column order (best first) so legend order matches
//! the leaderboard. Unset cells are skipped rather than drawn at zero.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Widget},
};
use tickerboard_core::{PercentChangeMatrix, RankedMetric};

use crate::theme::Theme;

pub struct ChartPanel<'a> {
    matrix: &'a PercentChangeMatrix,
    ranking: &'a [RankedMetric],
    theme: &'a Theme,
}

impl<'a> ChartPanel<'a> {
    pub fn new(
        matrix: &'a PercentChangeMatrix,
        ranking: &'a [RankedMetric],
        theme: &'a Theme,
    ) -> Self {
        Self {
            matrix,
            ranking,
            theme,
        }
    }

    /// `(row index, percent change)` points for every set cell.
    fn series(&self) -> Vec<Vec<(f64, f64)>> {
        self.matrix
            .columns()
            .iter()
            .map(|column| {
                column
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
                    .collect()
            })
            .collect()
    }

    /// Legend label for the column at `index`: `SYMBOL (Name)`.
    fn legend(&self, index: usize) -> String {
        let symbol = &self.matrix.columns()[index].symbol;
        self.ranking
            .iter()
            .find(|m| &m.symbol == symbol)
            .map(RankedMetric::label)
            .unwrap_or_else(|| symbol.clone())
    }

    /// Y bounds padded by 5%, always including zero.
    fn y_bounds(&self) -> [f64; 2] {
        let (lo, hi) = self.matrix.value_range().unwrap_or((0.0, 0.0));
        let (lo, hi) = (lo.min(0.0), hi.max(0.0));
        let padding = ((hi - lo) * 0.05).max(1.0);
        [lo - padding, hi + padding]
    }

    fn x_labels(&self) -> Vec<Span<'static>> {
        let stamps = self.matrix.timestamps();
        let fmt = |i: usize| {
            Span::styled(
                stamps[i].format("%Y-%m-%d").to_string(),
                Style::default().fg(self.theme.muted),
            )
        };
        match stamps.len() {
            0 => vec![],
            1 => vec![fmt(0)],
            2 => vec![fmt(0), fmt(1)],
            n => vec![fmt(0), fmt(n / 2), fmt(n - 1)],
        }
    }
}

impl<'a> Widget for ChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Percent Change Since Start ")
            .title_style(self.theme.header())
            .borders(Borders::ALL)
            .border_style(self.theme.border(true))
            .style(Style::default().bg(self.theme.background));

        let series = self.series();
        let datasets: Vec<Dataset> = series
            .iter()
            .enumerate()
            .map(|(i, points)| {
                Dataset::default()
                    .name(self.legend(i))
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.series_color(i)))
                    .data(points)
            })
            .collect();

        let x_max = self.matrix.row_count().saturating_sub(1).max(1) as f64;
        let [y_min, y_max] = self.y_bounds();

        let chart = Chart::new(datasets)
            .block(block)
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, x_max])
                    .labels(self.x_labels()),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("%", Style::default().fg(self.theme.muted)))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([y_min, y_max])
                    .labels(vec![
                        Span::styled(format!("{y_min:.0}"), Style::default().fg(self.theme.muted)),
                        Span::styled(
                            format!("{:.0}", (y_min + y_max) / 2.0),
                            Style::default().fg(self.theme.muted),
                        ),
                        Span::styled(format!("{y_max:.0}"), Style::default().fg(self.theme.muted)),
                    ]),
            );

        chart.render(area, buf);
    }
}
