//! Market data gateway trait and structured error types.
//!
//! The gateway abstracts over bar sources (Alpaca, CSV import, synthetic) so
//! the pipeline can swap implementations and tests can run offline.

use crate::domain::{Bar, BarInterval};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured gateway failures. Surfaced verbatim and fatal for the run.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("import error: {0}")]
    Import(String),
}

/// Where bars came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Alpaca,
    CsvImport,
    Synthetic,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Alpaca => "Alpaca",
            DataSource::CsvImport => "CSV import",
            DataSource::Synthetic => "synthetic",
        }
    }
}

/// A source of historical bars for a set of symbols.
///
/// Implementations return every bar in `[start, end]` (open-ended when `end`
/// is `None`) for every requested symbol in a single call. Partial results
/// are never returned: any failure is an error.
pub trait MarketDataGateway: Send + Sync {
    /// Human-readable name of this gateway.
    fn name(&self) -> &str;

    fn source(&self) -> DataSource;

    /// Fetch bars for `symbols` at `interval` starting at `start`.
    fn fetch(
        &self,
        symbols: &[&str],
        interval: BarInterval,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Bar>, GatewayError>;
}

/// Keep only bars inside `[start, end]`.
pub(crate) fn within_range(bar: &Bar, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> bool {
    bar.timestamp >= start && end.map_or(true, |e| bar.timestamp <= e)
}
