//! CSV import gateway - offline bar source.
//!
//! Expects a header row `symbol,timestamp,close`. Timestamps are RFC 3339
//! (`2024-11-04T05:00:00Z`) or plain dates (`2024-11-04`, read as midnight
//! UTC). Extra columns are ignored.

use super::provider::{within_range, DataSource, GatewayError, MarketDataGateway};
use crate::domain::{Bar, BarInterval};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    symbol: String,
    timestamp: String,
    close: f64,
}

/// Reads bars from a CSV file on every fetch.
pub struct CsvGateway {
    path: PathBuf,
}

impl CsvGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MarketDataGateway for CsvGateway {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn source(&self) -> DataSource {
        DataSource::CsvImport
    }

    /// The interval is not checked: the file holds whatever granularity it
    /// was exported with.
    fn fetch(
        &self,
        symbols: &[&str],
        _interval: BarInterval,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Bar>, GatewayError> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            GatewayError::Import(format!("open {}: {e}", self.path.display()))
        })?;
        let bars = read_bars(file, symbols, start, end)?;
        tracing::info!(
            path = %self.path.display(),
            bars = bars.len(),
            "loaded bars from CSV"
        );
        Ok(bars)
    }
}

/// Parse bars from any CSV reader, keeping requested symbols within range.
pub fn read_bars<R: std::io::Read>(
    reader: R,
    symbols: &[&str],
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<Vec<Bar>, GatewayError> {
    let wanted: HashSet<String> = symbols.iter().map(|s| s.to_ascii_uppercase()).collect();
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars = Vec::new();

    for (line, record) in rdr.deserialize::<CsvRow>().enumerate() {
        // Header is line 1.
        let row = record.map_err(|e| GatewayError::Import(format!("line {}: {e}", line + 2)))?;
        let symbol = row.symbol.to_ascii_uppercase();
        if !wanted.contains(&symbol) {
            continue;
        }
        let timestamp = parse_timestamp(&row.timestamp)
            .ok_or_else(|| GatewayError::Import(format!(
                "line {}: unparseable timestamp '{}'",
                line + 2,
                row.timestamp
            )))?;
        let bar = Bar::new(symbol, timestamp, row.close);
        if within_range(&bar, start, end) {
            bars.push(bar);
        }
    }

    Ok(bars)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const CSV: &str = "symbol,timestamp,close,volume
NVDA,2024-11-04T05:00:00Z,136.05,1
nvda,2024-11-05,139.91,1
AMD,2024-11-04,140.93,1
TSLA,2024-11-04,242.84,1
";

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 4, 0, 0, 0).unwrap()
    }

    #[test]
    fn reads_requested_symbols_only() {
        let bars = read_bars(CSV.as_bytes(), &["NVDA", "AMD"], start(), None).unwrap();
        assert_eq!(bars.len(), 3);
        assert!(bars.iter().all(|b| b.symbol != "TSLA"));
        assert_eq!(bars[1].symbol, "NVDA");
        assert_eq!(
            bars[1].timestamp,
            Utc.with_ymd_and_hms(2024, 11, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn applies_end_bound() {
        let end = Utc.with_ymd_and_hms(2024, 11, 4, 23, 59, 59).unwrap();
        let bars = read_bars(CSV.as_bytes(), &["NVDA"], start(), Some(end)).unwrap();
        assert_eq!(bars.len(), 1);
    }

    #[test]
    fn bad_timestamp_reports_line() {
        let csv = "symbol,timestamp,close\nNVDA,yesterday,1.0\n";
        let err = read_bars(csv.as_bytes(), &["NVDA"], start(), None).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn bad_close_is_import_error() {
        let csv = "symbol,timestamp,close\nNVDA,2024-11-04,abc\n";
        assert!(matches!(
            read_bars(csv.as_bytes(), &["NVDA"], start(), None),
            Err(GatewayError::Import(_))
        ));
    }

    #[test]
    fn missing_file_is_import_error() {
        let gw = CsvGateway::new("/nonexistent/bars.csv");
        let err = gw.fetch(&["NVDA"], BarInterval::Day, start(), None).unwrap_err();
        assert!(matches!(err, GatewayError::Import(_)));
    }
}
