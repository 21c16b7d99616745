//! Domain types for Tickerboard

pub mod bar;
pub mod interval;
pub mod pick;

pub use bar::Bar;
pub use interval::{BarInterval, IntervalParseError};
pub use pick::StockPick;
