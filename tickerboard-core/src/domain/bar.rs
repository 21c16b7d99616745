//! Bar - one observed close for one symbol at one timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Close price for a single symbol over a single interval.
///
/// Produced by a market data gateway. The transform only ever reads `close`,
/// so the gateway drops open/high/low/volume before handing bars over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl Bar {
    pub fn new(symbol: impl Into<String>, timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            close,
        }
    }

    /// Returns true if the close is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !self.close.is_finite()
    }
}
