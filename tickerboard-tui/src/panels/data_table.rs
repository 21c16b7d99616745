//! Data panel - the percent-change matrix as a table
//!
//! One row per timestamp, one column per pick in leaderboard order. Unset
//! cells (before a pick's first bar) show as `-`.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};
use tickerboard_core::PercentChangeMatrix;

use crate::theme::Theme;

pub struct DataTablePanel<'a> {
    matrix: &'a PercentChangeMatrix,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> DataTablePanel<'a> {
    pub fn new(matrix: &'a PercentChangeMatrix, scroll: usize, theme: &'a Theme) -> Self {
        Self {
            matrix,
            scroll,
            theme,
        }
    }

    fn format_cell(value: Option<f64>) -> String {
        value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
    }
}

impl<'a> Widget for DataTablePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(
                " Data [{} x {}] ",
                self.matrix.row_count(),
                self.matrix.column_count()
            ))
            .title_style(self.theme.header())
            .borders(Borders::ALL)
            .border_style(self.theme.border(true))
            .style(Style::default().bg(self.theme.background));

        let mut header_cells = vec![Cell::from("Timestamp").style(self.theme.header())];
        header_cells.extend(
            self.matrix
                .symbols()
                .into_iter()
                .map(|s| Cell::from(s.to_string()).style(self.theme.header())),
        );
        let header = Row::new(header_cells).height(1);

        let rows = self
            .matrix
            .timestamps()
            .iter()
            .enumerate()
            .skip(self.scroll)
            .map(|(i, ts)| {
                let mut cells =
                    vec![Cell::from(ts.format("%Y-%m-%d %H:%M").to_string())
                        .style(Style::default().fg(self.theme.text_secondary))];
                cells.extend(self.matrix.row(i).into_iter().map(|v| {
                    Cell::from(Self::format_cell(v))
                        .style(Style::default().fg(self.theme.change_color(v)))
                }));
                Row::new(cells)
            });

        let mut widths = vec![Constraint::Length(16)];
        widths.extend(std::iter::repeat(Constraint::Length(9)).take(self.matrix.column_count()));

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .render(area, buf);
    }
}
