//! Tickerboard TUI - terminal dashboard for a stock-picking contest
//!
//! Shows, top to bottom:
//! - Contest progress gauge
//! - Podium of the top five picks
//! - Percent change since the start, one line per pick
//! - Data / Ranking tabs

pub mod app;
pub mod input;
pub mod panels;
pub mod theme;
pub mod ui;

pub use app::App;
pub use input::{handle_key, Action};
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
