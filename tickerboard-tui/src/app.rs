//! Application state - single-owner, main-thread only.
//!
//! The pipeline runs synchronously on refresh; the app only stores its
//! latest output and what the user is looking at.

use chrono::Local;

use tickerboard_runner::{DashboardOutput, PipelineError};

use crate::theme::Theme;

/// Tabs below the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Percent-change matrix, one row per timestamp.
    #[default]
    Data,
    /// Leaderboard.
    Ranking,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Data, Tab::Ranking];

    pub fn index(self) -> usize {
        match self {
            Tab::Data => 0,
            Tab::Ranking => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Data => "Data",
            Tab::Ranking => "Ranking",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Data => Tab::Ranking,
            Tab::Ranking => Tab::Data,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

pub struct App {
    pub title: String,
    /// Output of the last successful refresh.
    pub output: Option<DashboardOutput>,
    pub tab: Tab,
    /// First visible table row.
    pub scroll: usize,
    pub status: Option<(String, StatusLevel)>,
    pub running: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            output: None,
            tab: Tab::default(),
            scroll: 0,
            status: None,
            running: true,
            theme: Theme::default(),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status = Some((message.into(), level));
    }

    /// Take the result of a refresh.
    ///
    /// A failed refresh keeps the previous output on screen and reports the
    /// failing stage in the status bar.
    pub fn apply(&mut self, result: Result<DashboardOutput, PipelineError>) {
        match result {
            Ok(output) => {
                let stamp = output.fetched_at.with_timezone(&Local).format("%H:%M:%S");
                let message = format!(
                    "Updated {stamp} · {} bars · {}",
                    output.bar_count,
                    output.source.label()
                );
                if output.is_synthetic() {
                    self.set_status(format!("{message} · SYNTHETIC DATA"), StatusLevel::Warning);
                } else {
                    self.set_status(message, StatusLevel::Info);
                }
                self.title = output.title.clone();
                self.output = Some(output);
                self.scroll = self.scroll.min(self.max_scroll());
            }
            Err(e) => {
                tracing::error!(stage = %e.stage(), error = %e, "refresh failed");
                self.set_status(format!("Refresh failed: {e}"), StatusLevel::Error);
            }
        }
    }

    /// Rows in the table of the active tab.
    pub fn row_count(&self) -> usize {
        match (&self.output, self.tab) {
            (None, _) => 0,
            (Some(o), Tab::Data) => o.matrix.row_count(),
            (Some(o), Tab::Ranking) => o.ranking.len(),
        }
    }

    fn max_scroll(&self) -> usize {
        self.row_count().saturating_sub(1)
    }

    pub fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.scroll = 0;
        }
    }
}
