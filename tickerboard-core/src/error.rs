//! Structured error types for configuration and the percent-change transform.
//!
//! Gateway failures live in [`crate::data::GatewayError`]. All three kinds are
//! fatal for a run; none of them carries a fallback value.

use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Malformed or missing static configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("stock picks file not found: {}", path.display())]
    PicksNotFound { path: PathBuf },

    #[error("failed to read stock picks file {}: {reason}", path.display())]
    PicksUnreadable { path: PathBuf, reason: String },

    #[error("malformed stock picks ({format}): {reason}")]
    PicksMalformed { format: &'static str, reason: String },

    #[error("unsupported stock picks format '{extension}' (expected .json or .toml)")]
    UnsupportedFormat { extension: String },

    #[error("stock picks list is empty")]
    NoPicks,

    #[error("stock pick #{index} has a blank symbol")]
    BlankSymbol { index: usize },

    #[error("duplicate symbol in stock picks: {symbol}")]
    DuplicateSymbol { symbol: String },

    #[error("missing required setting {key}")]
    MissingSetting { key: &'static str },

    #[error("invalid value for {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("contest end date {end} must be after start date {start}")]
    InvalidContestWindow { start: NaiveDate, end: NaiveDate },
}

/// The fetched bar set cannot be turned into a percent-change matrix.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("empty dataset: the gateway returned no bars for any symbol")]
    EmptyDataset,

    #[error("no bars returned for required symbol {symbol}")]
    MissingSymbol { symbol: String },

    #[error("bar for {symbol} is not in the stock picks registry")]
    UnknownSymbol { symbol: String },

    #[error("initial close for {symbol} at {timestamp} is zero; percent change is undefined")]
    ZeroInitialClose {
        symbol: String,
        timestamp: DateTime<Utc>,
    },

    #[error("non-finite close {close} for {symbol} at {timestamp}")]
    NonFiniteClose {
        symbol: String,
        timestamp: DateTime<Utc>,
        close: f64,
    },

    #[error("duplicate bar for {symbol} at {timestamp}")]
    DuplicateBar {
        symbol: String,
        timestamp: DateTime<Utc>,
    },

    #[error("table conversion failed: {0}")]
    Table(String),
}
