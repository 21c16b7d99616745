//! Shared fixtures for TUI tests.

use chrono::{NaiveDate, TimeZone, Utc};
use ratatui::buffer::Buffer;

use tickerboard_core::data::DataSource;
use tickerboard_core::domain::{Bar, StockPick};
use tickerboard_core::{normalize, ContestWindow, StockPicks, TransformOptions};
use tickerboard_runner::DashboardOutput;

/// Three picks over three days: NVDA +21%, AMD -10%, PLTR +25% (late start).
pub fn sample_output() -> DashboardOutput {
    let day = |d| Utc.with_ymd_and_hms(2024, 11, d, 21, 0, 0).unwrap();
    let bars = vec![
        Bar::new("NVDA", day(4), 100.0),
        Bar::new("NVDA", day(5), 110.0),
        Bar::new("NVDA", day(6), 121.0),
        Bar::new("AMD", day(4), 200.0),
        Bar::new("AMD", day(5), 180.0),
        Bar::new("PLTR", day(5), 40.0),
        Bar::new("PLTR", day(6), 50.0),
    ];
    let picks = StockPicks::new(vec![
        StockPick::new("NVDA", "Nvidia"),
        StockPick::new("AMD", "AMD"),
        StockPick::new("PLTR", "Palantir"),
    ])
    .unwrap();
    let out = normalize(&bars, &picks, &TransformOptions::default()).unwrap();

    let window = ContestWindow::new(
        NaiveDate::from_ymd_opt(2024, 11, 4).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 4).unwrap(),
    )
    .unwrap();
    let now = NaiveDate::from_ymd_opt(2024, 11, 14)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    DashboardOutput {
        title: "Tabula Tickers".into(),
        matrix: out.matrix,
        ranking: out.ranking,
        progress: window.progress_at(now),
        fetched_at: day(6),
        source: DataSource::CsvImport,
        bar_count: bars.len(),
    }
}

/// All symbols in a buffer, row by row.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buf[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
