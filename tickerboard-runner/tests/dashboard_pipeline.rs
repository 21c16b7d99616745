//! Integration tests: env lookup → picks file → gateway → outputs → artifacts.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

use tickerboard_core::data::DataSource;
use tickerboard_core::table::read_parquet;
use tickerboard_runner::{save_artifacts, ContestConfig, Dashboard, SourceChoice, Stage};

const PICKS_TOML: &str = r#"
[[picks]]
symbol = "nvda"
name = "Nvidia"
image = "nvda.png"

[[picks]]
symbol = "AMD"
name = "Advanced Micro Devices"
"#;

const BARS: &str = "symbol,timestamp,close
NVDA,2024-11-04,100.0
NVDA,2024-11-05,110.0
NVDA,2024-11-06,121.0
AMD,2024-11-04,100.0
AMD,2024-11-05,90.0
AMD,2024-11-06,90.0
";

fn config_in(dir: &Path, extra: &[(&str, &str)]) -> ContestConfig {
    let picks = dir.join("stock_picks.toml");
    std::fs::write(&picks, PICKS_TOML).unwrap();

    let mut env: HashMap<String, String> = HashMap::from([
        ("START_DATE".to_string(), "2024-11-04".to_string()),
        ("END_DATE".to_string(), "2024-12-04".to_string()),
        ("STOCK_PICKS".to_string(), picks.display().to_string()),
    ]);
    for (k, v) in extra {
        env.insert(k.to_string(), v.to_string());
    }
    ContestConfig::from_lookup(move |key| env.get(key).cloned()).unwrap()
}

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 14)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

#[test]
fn csv_source_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let bars = dir.path().join("bars.csv");
    std::fs::write(&bars, BARS).unwrap();

    let config = config_in(dir.path(), &[("CONTEST_TITLE", "Office Pool")]);
    let gateway = SourceChoice::Csv(bars).build(&config).unwrap();
    let dash = Dashboard::new(config, gateway).unwrap();
    assert_eq!(dash.picks().symbols(), vec!["NVDA", "AMD"]);

    let out = dash.refresh_at(now()).unwrap();
    assert_eq!(out.title, "Office Pool");
    assert_eq!(out.source, DataSource::CsvImport);
    assert_eq!(out.ranking[0].symbol, "NVDA");
    assert_eq!(out.ranking[0].percent_change, Some(21.0));
    assert_eq!(out.ranking[1].symbol, "AMD");
    assert_eq!(out.ranking[1].percent_change, Some(-10.0));
    assert_eq!(out.ranking[0].image, Some(Path::new("img").join("nvda.png")));
    assert_eq!(out.ranking[1].image, None);
    assert_eq!(out.progress.label(), "Day 10 / 30");

    let run_dir = save_artifacts(&out, &dash.config().window, dir.path()).unwrap();
    for name in [
        "matrix.csv",
        "matrix.parquet",
        "ranking.csv",
        "ranking.json",
        "progress.json",
        "report.md",
    ] {
        assert!(run_dir.join(name).exists(), "missing {name}");
    }

    let ranking: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(run_dir.join("ranking.json")).unwrap())
            .unwrap();
    assert_eq!(ranking[0]["symbol"], "NVDA");
    assert_eq!(ranking[0]["rank"], 1);

    let report = std::fs::read_to_string(run_dir.join("report.md")).unwrap();
    assert!(report.contains("![NVDA](img/nvda.png)"));

    let df = read_parquet(&run_dir.join("matrix.parquet")).unwrap();
    assert_eq!(df.shape(), (3, 3));
}

#[test]
fn re_export_of_same_data_reuses_directory() {
    let dir = tempfile::tempdir().unwrap();
    let bars = dir.path().join("bars.csv");
    std::fs::write(&bars, BARS).unwrap();

    let config = config_in(dir.path(), &[]);
    let gateway = SourceChoice::Csv(bars).build(&config).unwrap();
    let dash = Dashboard::new(config, gateway).unwrap();

    let out_dir = dir.path().join("out");
    let first = save_artifacts(&dash.refresh_at(now()).unwrap(), &dash.config().window, &out_dir)
        .unwrap();
    let second = save_artifacts(&dash.refresh_at(now()).unwrap(), &dash.config().window, &out_dir)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 1);
}

#[test]
fn synthetic_source_is_tagged() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), &[]);
    let gateway = SourceChoice::Synthetic.build(&config).unwrap();
    let dash = Dashboard::new(config, gateway).unwrap();

    let out = dash.refresh_at(now()).unwrap();
    assert!(out.is_synthetic());
    assert_eq!(out.ranking.len(), 2);
    for column in out.matrix.columns() {
        assert_eq!(column.values[0], Some(0.0));
    }

    let run_dir = save_artifacts(&out, &dash.config().window, dir.path()).unwrap();
    let report = std::fs::read_to_string(run_dir.join("report.md")).unwrap();
    assert!(report.contains("SYNTHETIC"));
}

#[test]
fn missing_csv_fails_in_fetch_stage() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), &[]);
    let gateway = SourceChoice::Csv(dir.path().join("absent.csv"))
        .build(&config)
        .unwrap();
    let dash = Dashboard::new(config, gateway).unwrap();

    let err = dash.refresh_at(now()).unwrap_err();
    assert_eq!(err.stage(), Stage::Fetch);
}

#[test]
fn duplicate_bars_fail_in_transform_stage() {
    let dir = tempfile::tempdir().unwrap();
    let bars = dir.path().join("bars.csv");
    std::fs::write(
        &bars,
        "symbol,timestamp,close\nNVDA,2024-11-04,1.0\nNVDA,2024-11-04,2.0\n",
    )
    .unwrap();

    let config = config_in(dir.path(), &[]);
    let gateway = SourceChoice::Csv(bars).build(&config).unwrap();
    let dash = Dashboard::new(config, gateway).unwrap();

    let err = dash.refresh_at(now()).unwrap_err();
    assert_eq!(err.stage(), Stage::Transform);
}
