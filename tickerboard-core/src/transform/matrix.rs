//! Percent-change matrix: timestamps × symbols.
//!
//! Stored column-major. Each column holds one symbol's percent change versus
//! its first observed close, `None` where the symbol has no observation (and,
//! after forward-fill, only before its first one).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One symbol's series aligned to the matrix timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixColumn {
    pub symbol: String,
    pub values: Vec<Option<f64>>,
}

impl MatrixColumn {
    /// Index of the first observed cell.
    pub fn first_observed(&self) -> Option<usize> {
        self.values.iter().position(|v| v.is_some())
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Carry the last observed value forward over unset cells.
    fn forward_fill(&mut self) {
        let mut carry = None;
        for cell in &mut self.values {
            match cell {
                Some(v) => carry = Some(*v),
                None => *cell = carry,
            }
        }
    }
}

/// Percent-change table keyed by (timestamp, symbol).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentChangeMatrix {
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<MatrixColumn>,
}

impl PercentChangeMatrix {
    /// Build a matrix from an ascending timeline and aligned columns.
    ///
    /// Callers guarantee every column has exactly `timestamps.len()` cells.
    pub(crate) fn new(timestamps: Vec<DateTime<Utc>>, columns: Vec<MatrixColumn>) -> Self {
        debug_assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(columns.iter().all(|c| c.values.len() == timestamps.len()));
        Self {
            timestamps,
            columns,
        }
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn columns(&self) -> &[MatrixColumn] {
        &self.columns
    }

    /// Symbols in current column order.
    pub fn symbols(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.symbol.as_str()).collect()
    }

    pub fn column(&self, symbol: &str) -> Option<&MatrixColumn> {
        self.columns.iter().find(|c| c.symbol == symbol)
    }

    /// Cell at (row, column index).
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.columns
            .get(col)
            .and_then(|c| c.values.get(row).copied().flatten())
    }

    /// One row across all columns, in column order.
    pub fn row(&self, row: usize) -> Vec<Option<f64>> {
        self.columns
            .iter()
            .map(|c| c.values.get(row).copied().flatten())
            .collect()
    }

    /// The final row paired with its symbols.
    pub fn last_row(&self) -> Vec<(&str, Option<f64>)> {
        self.columns
            .iter()
            .map(|c| (c.symbol.as_str(), c.last()))
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Fill unset cells from the most recent prior observation in each column.
    ///
    /// Idempotent: a second pass finds nothing to fill.
    pub fn forward_fill(&mut self) {
        for column in &mut self.columns {
            column.forward_fill();
        }
    }

    /// Reorder columns by final-row value, best first.
    ///
    /// Stable: equal values keep their relative order. Unset final cells sort
    /// after every set value.
    pub fn sort_by_last_row(&mut self) {
        self.columns
            .sort_by(|a, b| descending_unset_last(a.last(), b.last()));
    }

    /// Smallest and largest set value, if any cell is set.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.columns
            .iter()
            .flat_map(|c| c.values.iter().flatten().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Descending order on optional values, `None` last.
pub(crate) fn descending_unset_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
