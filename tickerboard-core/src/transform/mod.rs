//! Normalization & ranking transform.
//!
//! Turns raw bars into a percent-change matrix and a leaderboard:
//! 1. Group bars by symbol (registry order), ascending by timestamp
//! 2. Percent change of each close against the symbol's first close
//! 3. Pivot onto the union of all timestamps
//! 4. Forward-fill gaps (configurable)
//! 5. Sort columns by the final row, best first
//! 6. Rank
//!
//! The transform is pure: it needs the complete bar set and never touches the
//! network or the environment.

pub mod matrix;
pub mod ranking;

pub use matrix::{MatrixColumn, PercentChangeMatrix};
pub use ranking::{attach_images, podium, rank, round1, RankedMetric};

use crate::domain::Bar;
use crate::error::DataError;
use crate::registry::StockPicks;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How gaps in a symbol's series are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Carry the last observed value forward (no breaks in the chart).
    #[default]
    ForwardFill,
    /// Leave gaps unset.
    None,
}

/// What to do with a registry symbol that has no bars at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSymbolPolicy {
    /// Drop it from the matrix and the ranking.
    #[default]
    Exclude,
    /// Fail the run with [`DataError::MissingSymbol`].
    Fail,
}

/// Transform options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    #[serde(default)]
    pub fill: FillPolicy,
    #[serde(default)]
    pub missing: MissingSymbolPolicy,
}

/// Matrix plus leaderboard, both in best-first order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformOutput {
    pub matrix: PercentChangeMatrix,
    pub ranking: Vec<RankedMetric>,
}

/// Run the transform over a complete bar set.
pub fn normalize(
    bars: &[Bar],
    picks: &StockPicks,
    opts: &TransformOptions,
) -> Result<TransformOutput, DataError> {
    if bars.is_empty() {
        return Err(DataError::EmptyDataset);
    }

    let groups = group_by_symbol(bars, picks)?;

    let mut series: Vec<(String, BTreeMap<DateTime<Utc>, f64>)> = Vec::with_capacity(groups.len());
    for (pick, closes) in picks.iter().zip(groups) {
        if closes.is_empty() {
            match opts.missing {
                MissingSymbolPolicy::Exclude => {
                    tracing::warn!(symbol = %pick.symbol, "no bars returned; excluding symbol");
                    continue;
                }
                MissingSymbolPolicy::Fail => {
                    return Err(DataError::MissingSymbol {
                        symbol: pick.symbol.clone(),
                    });
                }
            }
        }
        series.push((pick.symbol.clone(), percent_changes(&pick.symbol, &closes)?));
    }

    let mut matrix = pivot(series);
    if opts.fill == FillPolicy::ForwardFill {
        matrix.forward_fill();
    }
    matrix.sort_by_last_row();

    let ranking = rank(&matrix, picks);

    tracing::info!(
        symbols = matrix.column_count(),
        timestamps = matrix.row_count(),
        leader = ranking.first().map(|m| m.symbol.as_str()).unwrap_or("-"),
        "built percent-change matrix"
    );

    Ok(TransformOutput { matrix, ranking })
}

/// Group closes by registry position, keyed and ordered by timestamp.
fn group_by_symbol(
    bars: &[Bar],
    picks: &StockPicks,
) -> Result<Vec<BTreeMap<DateTime<Utc>, f64>>, DataError> {
    let mut groups: Vec<BTreeMap<DateTime<Utc>, f64>> = vec![BTreeMap::new(); picks.len()];

    for bar in bars {
        let pos = picks
            .position(&bar.symbol)
            .ok_or_else(|| DataError::UnknownSymbol {
                symbol: bar.symbol.clone(),
            })?;

        if bar.is_void() {
            return Err(DataError::NonFiniteClose {
                symbol: bar.symbol.clone(),
                timestamp: bar.timestamp,
                close: bar.close,
            });
        }

        if groups[pos].insert(bar.timestamp, bar.close).is_some() {
            return Err(DataError::DuplicateBar {
                symbol: bar.symbol.clone(),
                timestamp: bar.timestamp,
            });
        }
    }

    Ok(groups)
}

/// Percent change of every close against the first one.
fn percent_changes(
    symbol: &str,
    closes: &BTreeMap<DateTime<Utc>, f64>,
) -> Result<BTreeMap<DateTime<Utc>, f64>, DataError> {
    let Some((&first_ts, &initial_close)) = closes.iter().next() else {
        return Ok(BTreeMap::new());
    };

    if initial_close == 0.0 {
        return Err(DataError::ZeroInitialClose {
            symbol: symbol.to_string(),
            timestamp: first_ts,
        });
    }

    Ok(closes
        .iter()
        .map(|(&ts, &close)| {
            let pct = if ts == first_ts {
                0.0
            } else {
                (close - initial_close) / initial_close * 100.0
            };
            (ts, pct)
        })
        .collect())
}

/// Align every series onto the union of their timestamps.
fn pivot(series: Vec<(String, BTreeMap<DateTime<Utc>, f64>)>) -> PercentChangeMatrix {
    let timeline: BTreeSet<DateTime<Utc>> = series
        .iter()
        .flat_map(|(_, values)| values.keys().copied())
        .collect();
    let timestamps: Vec<DateTime<Utc>> = timeline.into_iter().collect();

    let columns = series
        .into_iter()
        .map(|(symbol, values)| MatrixColumn {
            values: timestamps.iter().map(|ts| values.get(ts).copied()).collect(),
            symbol,
        })
        .collect();

    PercentChangeMatrix::new(timestamps, columns)
}
