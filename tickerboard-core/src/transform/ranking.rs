//! Leaderboard derived from the final row of the percent-change matrix.

use super::matrix::PercentChangeMatrix;
use crate::registry::StockPicks;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMetric {
    /// 1-based position.
    pub rank: usize,
    pub symbol: String,
    pub name: String,
    /// Final percent change rounded to one decimal place. `None` only when
    /// forward-fill is disabled and the symbol has no final-row observation.
    pub percent_change: Option<f64>,
    /// Picker image, resolved against the image directory by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl RankedMetric {
    /// `"SYMBOL (Name)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.symbol, self.name)
    }

    /// Signed percentage, e.g. `+21.0%`; `n/a` when unset.
    pub fn delta(&self) -> String {
        match self.percent_change {
            Some(v) => format!("{v:+.1}%"),
            None => "n/a".to_string(),
        }
    }
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the leaderboard in the matrix's current column order.
///
/// The matrix must already be sorted by its final row; ranks follow column
/// position. Symbols missing from the registry get their symbol as name.
pub fn rank(matrix: &PercentChangeMatrix, picks: &StockPicks) -> Vec<RankedMetric> {
    matrix
        .last_row()
        .into_iter()
        .enumerate()
        .map(|(i, (symbol, value))| RankedMetric {
            rank: i + 1,
            symbol: symbol.to_string(),
            name: picks.name(symbol).unwrap_or(symbol).to_string(),
            percent_change: value.map(round1),
            image: None,
        })
        .collect()
}

/// Resolve each entry's picker image against `image_dir`.
pub fn attach_images(ranking: &mut [RankedMetric], picks: &StockPicks, image_dir: &Path) {
    for m in ranking {
        m.image = picks.image_path(&m.symbol, image_dir);
    }
}

/// The top `n` entries (the dashboard's 1st..nth cards).
pub fn podium(ranking: &[RankedMetric], n: usize) -> &[RankedMetric] {
    &ranking[..n.min(ranking.len())]
}
