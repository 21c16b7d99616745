//! Top-level UI layout.
//!
//! ```text
//! ┌ title ── progress gauge ─────────────┐
//! │ 1st │ 2nd │ 3rd │ 4th │ 5th          │  podium
//! │ percent-change chart                 │
//! │ Data | Ranking                       │  tabs
//! │ table for the active tab             │
//! └ status bar ──────────────────────────┘
//! ```

pub mod status_bar;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use crate::app::{App, Tab};
use crate::panels::{ChartPanel, DataTablePanel, LeaderboardPanel, PodiumPanel, ProgressPanel};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    match &app.output {
        Some(_) => draw_dashboard(f, chunks[0], app),
        None => draw_placeholder(f, chunks[0], app),
    }

    status_bar::render(f, chunks[1], app);
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let Some(output) = &app.output else {
        return;
    };
    let theme = &app.theme;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Percentage(55),
            Constraint::Length(1),
            Constraint::Min(4),
        ])
        .split(area);

    f.render_widget(ProgressPanel::new(&app.title, &output.progress, theme), rows[0]);
    f.render_widget(PodiumPanel::new(&output.ranking, theme), rows[1]);
    f.render_widget(
        ChartPanel::new(&output.matrix, &output.ranking, theme),
        rows[2],
    );

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| Line::from(t.label())))
        .select(app.tab.index())
        .style(Style::default().fg(theme.muted))
        .highlight_style(theme.header())
        .divider("|");
    f.render_widget(tabs, rows[3]);

    match app.tab {
        Tab::Data => f.render_widget(DataTablePanel::new(&output.matrix, app.scroll, theme), rows[4]),
        Tab::Ranking => {
            f.render_widget(LeaderboardPanel::new(&output.ranking, app.scroll, theme), rows[4])
        }
    }
}

fn draw_placeholder(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", app.title))
        .title_style(app.theme.header())
        .borders(Borders::ALL)
        .border_style(app.theme.border(false));

    let text = vec![
        Line::from(""),
        Line::from("No data loaded."),
        Line::from(""),
        Line::from("Press r to fetch, q to quit."),
    ];
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(block),
        area,
    );
}
