//! Tickerboard Core - stock picks, market data gateways, percent-change transform.
//!
//! This crate contains the pure heart of the contest dashboard:
//! - Domain types (stock picks, bars, bar intervals)
//! - Stock picks registry with O(1) symbol lookup
//! - Market data gateway trait plus Alpaca, CSV and synthetic sources
//! - Normalization & ranking transform (percent-change matrix, leaderboard)
//! - Contest window progress
//! - Polars table views for export

pub mod data;
pub mod domain;
pub mod error;
pub mod progress;
pub mod registry;
pub mod table;
pub mod transform;

pub use error::{ConfigError, DataError};
pub use progress::{ContestWindow, Progress};
pub use registry::StockPicks;
pub use transform::{
    normalize, FillPolicy, MissingSymbolPolicy, PercentChangeMatrix, RankedMetric,
    TransformOptions, TransformOutput,
};
