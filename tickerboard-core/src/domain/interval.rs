//! Bar interval requested from the market data gateway.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Aggregation interval for bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BarInterval {
    /// One bar per trading day.
    #[default]
    Day,
    /// One bar per `n` hours, `n` in 1..=23.
    Hour(u8),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalParseError {
    #[error("unrecognised bar interval '{0}' (expected e.g. 1Day or 6Hour)")]
    Unrecognised(String),

    #[error("hour interval must be between 1 and 23, got {0}")]
    HoursOutOfRange(u32),
}

impl BarInterval {
    /// Wire form used by the vendor: `1Day`, `6Hour`.
    pub fn as_timeframe(&self) -> String {
        match self {
            BarInterval::Day => "1Day".to_string(),
            BarInterval::Hour(n) => format!("{n}Hour"),
        }
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_timeframe())
    }
}

impl FromStr for BarInterval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if matches!(lower.as_str(), "day" | "1day" | "1d") {
            return Ok(BarInterval::Day);
        }

        let digits = lower
            .strip_suffix("hour")
            .or_else(|| lower.strip_suffix('h'))
            .ok_or_else(|| IntervalParseError::Unrecognised(s.to_string()))?;
        let hours: u32 = digits
            .parse()
            .map_err(|_| IntervalParseError::Unrecognised(s.to_string()))?;
        if !(1..=23).contains(&hours) {
            return Err(IntervalParseError::HoursOutOfRange(hours));
        }
        Ok(BarInterval::Hour(hours as u8))
    }
}

impl TryFrom<String> for BarInterval {
    type Error = IntervalParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BarInterval> for String {
    fn from(value: BarInterval) -> Self {
        value.as_timeframe()
    }
}
