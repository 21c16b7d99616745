//! Polars views of the transform output.
//!
//! The matrix becomes a wide frame: a `timestamp` Datetime(ms) column followed
//! by one Float64 column per symbol in display order, null where unset. The
//! ranking becomes a long frame with one row per symbol.

use crate::error::DataError;
use crate::transform::{PercentChangeMatrix, RankedMetric};
use polars::prelude::*;
use std::fs;
use std::path::Path;

fn table_err(context: &str) -> impl Fn(PolarsError) -> DataError + '_ {
    move |e| DataError::Table(format!("{context}: {e}"))
}

/// Wide frame: timestamp + one column per symbol.
pub fn matrix_to_dataframe(matrix: &PercentChangeMatrix) -> Result<DataFrame, DataError> {
    let millis: Vec<i64> = matrix
        .timestamps()
        .iter()
        .map(|ts| ts.timestamp_millis())
        .collect();

    let mut columns = Vec::with_capacity(matrix.column_count() + 1);
    columns.push(
        Column::new("timestamp".into(), millis)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .map_err(table_err("timestamp cast"))?,
    );
    for column in matrix.columns() {
        columns.push(Column::new(
            column.symbol.as_str().into(),
            column.values.clone(),
        ));
    }

    DataFrame::new(columns).map_err(table_err("matrix frame"))
}

impl PercentChangeMatrix {
    /// Polars view of the matrix; see [`matrix_to_dataframe`].
    pub fn to_dataframe(&self) -> Result<DataFrame, DataError> {
        matrix_to_dataframe(self)
    }
}

/// Long frame: rank, symbol, name, percent_change.
pub fn ranking_to_dataframe(ranking: &[RankedMetric]) -> Result<DataFrame, DataError> {
    let ranks: Vec<u32> = ranking.iter().map(|m| m.rank as u32).collect();
    let symbols: Vec<&str> = ranking.iter().map(|m| m.symbol.as_str()).collect();
    let names: Vec<&str> = ranking.iter().map(|m| m.name.as_str()).collect();
    let changes: Vec<Option<f64>> = ranking.iter().map(|m| m.percent_change).collect();

    DataFrame::new(vec![
        Column::new("rank".into(), ranks),
        Column::new("symbol".into(), symbols),
        Column::new("name".into(), names),
        Column::new("percent_change".into(), changes),
    ])
    .map_err(table_err("ranking frame"))
}

/// Write a frame to a Parquet file.
pub fn write_parquet(df: &DataFrame, path: &Path) -> Result<(), DataError> {
    let file = fs::File::create(path)
        .map_err(|e| DataError::Table(format!("create {}: {e}", path.display())))?;
    ParquetWriter::new(file)
        .finish(&mut df.clone())
        .map_err(table_err("write parquet"))?;
    Ok(())
}

/// Read a Parquet file back into a frame.
pub fn read_parquet(path: &Path) -> Result<DataFrame, DataError> {
    let file = fs::File::open(path)
        .map_err(|e| DataError::Table(format!("open {}: {e}", path.display())))?;
    ParquetReader::new(file)
        .finish()
        .map_err(table_err("read parquet"))
}
