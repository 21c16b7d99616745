//! Synthetic bar gateway for development and demos.
//!
//! Produces a random walk from 100.0 per symbol, seeded from the BLAKE3 hash
//! of the symbol so runs are reproducible. Weekends are skipped. Output is
//! tagged `DataSource::Synthetic` and must never be mistaken for market data.

use super::provider::{DataSource, GatewayError, MarketDataGateway};
use crate::domain::{Bar, BarInterval};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic random-walk bar source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGateway;

impl SyntheticGateway {
    pub fn new() -> Self {
        Self
    }

    fn rng_for(&self, symbol: &str) -> StdRng {
        StdRng::from_seed(*blake3::hash(symbol.as_bytes()).as_bytes())
    }

    /// Bars for one symbol over `[start, end]`.
    pub fn generate(
        &self,
        symbol: &str,
        interval: BarInterval,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Bar> {
        let mut rng = self.rng_for(symbol);
        let (step, first) = match interval {
            // Daily bars stamped at the 21:00 UTC close.
            BarInterval::Day => (
                Duration::days(1),
                start.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::hours(21),
            ),
            BarInterval::Hour(n) => (Duration::hours(i64::from(n)), start),
        };
        let max_move = match interval {
            BarInterval::Day => 0.03,
            BarInterval::Hour(_) => 0.01,
        };

        let mut bars = Vec::new();
        let mut price = 100.0_f64;
        let mut current = first;

        while current <= end {
            if current >= start && !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                let ret: f64 = rng.gen_range(-max_move..max_move);
                price *= 1.0 + ret;
                bars.push(Bar::new(symbol, current, price));
            }
            current += step;
        }

        bars
    }
}

impl MarketDataGateway for SyntheticGateway {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch(
        &self,
        symbols: &[&str],
        interval: BarInterval,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Bar>, GatewayError> {
        let end = end.unwrap_or_else(Utc::now);
        if end < start {
            return Err(GatewayError::InvalidRequest(format!(
                "end {end} precedes start {start}"
            )));
        }

        tracing::warn!("generating synthetic bars; results are not market data");
        Ok(symbols
            .iter()
            .flat_map(|s| self.generate(s, interval, start, end))
            .collect())
    }
}
