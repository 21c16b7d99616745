//! Artifact export - CSV, JSON, Parquet and Markdown.
//!
//! One refresh is written to a directory named by a BLAKE3 hash of its data:
//! - `matrix.csv` / `matrix.parquet` - the percent-change matrix, wide
//! - `ranking.csv` / `ranking.json` - the leaderboard
//! - `progress.json` - contest window and elapsed-time progress
//! - `report.md` - human-readable summary
//!
//! Artifacts are write-only; nothing in the workspace reads them back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use tickerboard_core::table::{matrix_to_dataframe, write_parquet};
use tickerboard_core::{ContestWindow, PercentChangeMatrix, Progress, RankedMetric};

use crate::pipeline::DashboardOutput;

/// Contents of `progress.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressArtifact {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_passed: i64,
    pub days_total: i64,
    pub fraction: f64,
    pub label: String,
    pub fetched_at: DateTime<Utc>,
    pub synthetic: bool,
}

impl ProgressArtifact {
    pub fn new(output: &DashboardOutput, window: &ContestWindow) -> Self {
        let Progress {
            days_passed,
            days_total,
            fraction,
        } = output.progress;
        Self {
            title: output.title.clone(),
            start_date: window.start(),
            end_date: window.end(),
            days_passed,
            days_total,
            fraction,
            label: output.progress.label(),
            fetched_at: output.fetched_at,
            synthetic: output.is_synthetic(),
        }
    }
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Wide matrix CSV: `timestamp` then one column per symbol, blank when unset.
pub fn export_matrix_csv(matrix: &PercentChangeMatrix) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["timestamp".to_string()];
    header.extend(matrix.symbols().into_iter().map(str::to_string));
    wtr.write_record(&header)?;

    for (i, ts) in matrix.timestamps().iter().enumerate() {
        let mut record = vec![ts.to_rfc3339_opts(SecondsFormat::Secs, true)];
        record.extend(
            matrix
                .row(i)
                .into_iter()
                .map(|v| v.map(|v| format!("{v:.4}")).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Leaderboard CSV: rank, symbol, name, percent_change.
pub fn export_ranking_csv(ranking: &[RankedMetric]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["rank", "symbol", "name", "percent_change"])?;
    for m in ranking {
        wtr.write_record([
            &m.rank.to_string(),
            &m.symbol,
            &m.name,
            &m.percent_change.map(|v| format!("{v:.1}")).unwrap_or_default(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_ranking_json(ranking: &[RankedMetric]) -> Result<String> {
    serde_json::to_string_pretty(ranking).context("failed to serialize ranking to JSON")
}

pub fn export_progress_json(artifact: &ProgressArtifact) -> Result<String> {
    serde_json::to_string_pretty(artifact).context("failed to serialize progress to JSON")
}

// ─── Run id ─────────────────────────────────────────────────────────

/// Content hash of a refresh, ignoring when it was fetched.
///
/// Two refreshes over identical bars and an identical progress value share
/// an id, so re-exporting unchanged data overwrites the same directory.
pub fn run_id(output: &DashboardOutput) -> Result<String> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(output.title.as_bytes());
    hasher.update(
        &serde_json::to_vec(&output.matrix).context("failed to serialize matrix for hashing")?,
    );
    hasher.update(
        &serde_json::to_vec(&output.ranking).context("failed to serialize ranking for hashing")?,
    );
    hasher.update(
        &serde_json::to_vec(&output.progress).context("failed to serialize progress for hashing")?,
    );
    Ok(hasher.finalize().to_hex().as_str()[..16].to_string())
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one refresh.
///
/// Creates `{run_id}/` under `output_dir` and returns its path.
pub fn save_artifacts(
    output: &DashboardOutput,
    window: &ContestWindow,
    output_dir: &Path,
) -> Result<PathBuf> {
    let run_dir = output_dir.join(run_id(output)?);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    write(&run_dir, "matrix.csv", &export_matrix_csv(&output.matrix)?)?;
    write(&run_dir, "ranking.csv", &export_ranking_csv(&output.ranking)?)?;
    write(&run_dir, "ranking.json", &export_ranking_json(&output.ranking)?)?;

    let artifact = ProgressArtifact::new(output, window);
    write(&run_dir, "progress.json", &export_progress_json(&artifact)?)?;

    let df = matrix_to_dataframe(&output.matrix).context("failed to build matrix frame")?;
    write_parquet(&df, &run_dir.join("matrix.parquet"))
        .context("failed to write matrix.parquet")?;

    write(&run_dir, "report.md", &generate_report(output, window))?;

    tracing::info!(dir = %run_dir.display(), "artifacts written");
    Ok(run_dir)
}

fn write(dir: &Path, name: &str, contents: &str) -> Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))
}

// ─── Markdown report ────────────────────────────────────────────────

/// Markdown summary of one refresh.
pub fn generate_report(output: &DashboardOutput, window: &ContestWindow) -> String {
    let mut md = String::with_capacity(1024);

    md.push_str(&format!("# {}\n\n", output.title));

    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!(
        "| Contest | {} to {} |\n",
        window.start(),
        window.end()
    ));
    md.push_str(&format!(
        "| Progress | {} ({:.0}%) |\n",
        output.progress.label(),
        output.progress.percent()
    ));
    md.push_str(&format!(
        "| Fetched | {} |\n",
        output.fetched_at.format("%Y-%m-%d %H:%M UTC")
    ));
    md.push_str(&format!("| Bars | {} |\n", output.bar_count));
    if output.is_synthetic() {
        md.push_str("| Data | **SYNTHETIC** |\n");
    }
    md.push('\n');

    md.push_str("## Leaderboard\n\n");
    md.push_str("| Rank | Pick | Change | Image |\n");
    md.push_str("| ---: | --- | ---: | --- |\n");
    for m in &output.ranking {
        let image = match &m.image {
            Some(path) => format!("![{}]({})", m.symbol, path.display()),
            None => "-".to_string(),
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            m.rank,
            m.label(),
            m.delta(),
            image
        ));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use tickerboard_core::data::DataSource;
    use tickerboard_core::domain::{Bar, StockPick};
    use tickerboard_core::{normalize, StockPicks, TransformOptions};

    fn window() -> ContestWindow {
        ContestWindow::new(
            NaiveDate::from_ymd_opt(2024, 11, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 4).unwrap(),
        )
        .unwrap()
    }

    fn output() -> DashboardOutput {
        let day = |d| Utc.with_ymd_and_hms(2024, 11, d, 5, 0, 0).unwrap();
        let bars = vec![
            Bar::new("NVDA", day(4), 100.0),
            Bar::new("NVDA", day(5), 110.0),
            Bar::new("AMD", day(5), 50.0),
        ];
        let picks = StockPicks::new(vec![
            StockPick::new("AMD", "Advanced Micro Devices, Inc."),
            StockPick::new("NVDA", "Nvidia"),
        ])
        .unwrap();
        let out = normalize(&bars, &picks, &TransformOptions::default()).unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 11, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        DashboardOutput {
            title: "Tabula Tickers".into(),
            matrix: out.matrix,
            ranking: out.ranking,
            progress: window().progress_at(now),
            fetched_at: Utc.with_ymd_and_hms(2024, 11, 14, 12, 0, 0).unwrap(),
            source: DataSource::CsvImport,
            bar_count: 3,
        }
    }

    #[test]
    fn matrix_csv_leaves_unset_cells_blank() {
        let csv = export_matrix_csv(&output().matrix).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "timestamp,NVDA,AMD");
        assert_eq!(lines[1], "2024-11-04T05:00:00Z,0.0000,");
        assert_eq!(lines[2], "2024-11-05T05:00:00Z,10.0000,0.0000");
    }

    #[test]
    fn ranking_csv_quotes_names_with_commas() {
        let csv = export_ranking_csv(&output().ranking).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "rank,symbol,name,percent_change");
        assert_eq!(lines[1], "1,NVDA,Nvidia,10.0");
        assert_eq!(lines[2], "2,AMD,\"Advanced Micro Devices, Inc.\",0.0");
    }

    #[test]
    fn run_id_ignores_fetch_time() {
        let a = output();
        let mut b = output();
        b.fetched_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(run_id(&a).unwrap(), run_id(&b).unwrap());

        b.title = "Other".into();
        assert_ne!(run_id(&a).unwrap(), run_id(&b).unwrap());
        assert_eq!(run_id(&a).unwrap().len(), 16);
    }

    #[test]
    fn progress_artifact_carries_window_and_label() {
        let artifact = ProgressArtifact::new(&output(), &window());
        assert_eq!(artifact.label, "Day 10 / 30");
        assert_eq!(artifact.fraction, 0.3);
        assert!(!artifact.synthetic);

        let json = export_progress_json(&artifact).unwrap();
        let back: ProgressArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, artifact);
    }

    #[test]
    fn report_lists_every_pick() {
        let md = generate_report(&output(), &window());
        assert!(md.starts_with("# Tabula Tickers"));
        assert!(md.contains("| 1 | NVDA (Nvidia) | +10.0% |"));
        assert!(md.contains("| 2 | AMD (Advanced Micro Devices, Inc.) | +0.0% |"));
        assert!(md.contains("Day 10 / 30 (30%)"));
        assert!(!md.contains("SYNTHETIC"));
    }

    #[test]
    fn report_links_picker_images() {
        let mut out = output();
        out.ranking[0].image = Some(PathBuf::from("img/nvda.png"));
        let md = generate_report(&out, &window());
        assert!(md.contains("| 1 | NVDA (Nvidia) | +10.0% | ![NVDA](img/nvda.png) |"));
        assert!(md.contains("| +0.0% | - |"));
    }
}
