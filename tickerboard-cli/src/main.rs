//! Tickerboard CLI - contest leaderboard, progress, and export commands.
//!
//! Commands:
//! - `leaderboard` - fetch bars and print the ranking with contest progress
//! - `progress` - print how far into the contest window we are
//! - `export` - fetch bars and write CSV / JSON / Parquet / Markdown artifacts
//! - `picks` - list the stock picks registry
//!
//! Settings come from the environment (and `.env`); see `ContestConfig`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tickerboard_core::progress::parse_date;
use tickerboard_core::{FillPolicy, StockPicks, TransformOptions};
use tickerboard_runner::{save_artifacts, ContestConfig, Dashboard, DashboardOutput, SourceChoice};

#[derive(Parser)]
#[command(
    name = "tickerboard",
    about = "Tickerboard CLI - stock-picking contest dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch bars and print the leaderboard.
    Leaderboard {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the full dashboard output as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print contest progress.
    Progress {
        /// Measure progress on this date (YYYY-MM-DD) instead of now.
        #[arg(long)]
        at: Option<String>,
    },
    /// Fetch bars and write the artifact set.
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory; each run gets a hash-named subdirectory.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// List the stock picks registry.
    Picks {
        /// Picks file (overrides STOCK_PICKS).
        #[arg(long)]
        picks: Option<PathBuf>,

        /// Print the registry as TOML.
        #[arg(long, default_value_t = false)]
        toml: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Read bars from a `symbol,timestamp,close` CSV instead of Alpaca.
    #[arg(long, conflicts_with = "synthetic")]
    csv: Option<PathBuf>,

    /// Use a deterministic random walk (developer mode, not market data).
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Picks file (overrides STOCK_PICKS).
    #[arg(long)]
    picks: Option<PathBuf>,

    /// Leave gaps unset instead of carrying the last value forward.
    #[arg(long, default_value_t = false)]
    no_fill: bool,
}

impl SourceArgs {
    fn choice(&self) -> SourceChoice {
        match (&self.csv, self.synthetic) {
            (Some(path), _) => SourceChoice::Csv(path.clone()),
            (None, true) => SourceChoice::Synthetic,
            (None, false) => SourceChoice::Alpaca,
        }
    }

    /// Config from the environment with command-line overrides applied.
    fn dashboard(&self) -> Result<Dashboard> {
        let mut config = load_config()?;
        if let Some(path) = &self.picks {
            config = config.with_picks_path(path);
        }
        if self.no_fill {
            let transform = TransformOptions {
                fill: FillPolicy::None,
                ..config.transform
            };
            config = config.with_transform(transform);
        }
        let gateway = self.choice().build(&config)?;
        Ok(Dashboard::new(config, gateway)?)
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Leaderboard { source, json } => run_leaderboard(&source, json),
        Commands::Progress { at } => run_progress(at.as_deref()),
        Commands::Export { source, output_dir } => run_export(&source, output_dir),
        Commands::Picks { picks, toml } => run_picks(picks, toml),
    }
}

fn load_config() -> Result<ContestConfig> {
    ContestConfig::from_env().context("failed to read contest settings")
}

fn run_leaderboard(source: &SourceArgs, json: bool) -> Result<()> {
    let dashboard = source.dashboard()?;
    let output = dashboard.refresh()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&output);
    }
    Ok(())
}

fn run_progress(at: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let progress = match at {
        Some(date) => {
            let date: NaiveDate = parse_date("--at", date)?;
            config.window.progress_at(date.and_time(chrono::NaiveTime::MIN))
        }
        None => config.window.progress_now(),
    };

    println!(
        "{}: {} to {}",
        config.title,
        config.window.start(),
        config.window.end()
    );
    println!(
        "{}  [{}] {:.0}%",
        progress.label(),
        bar(progress.fraction, 30),
        progress.percent()
    );
    Ok(())
}

fn run_export(source: &SourceArgs, output_dir: PathBuf) -> Result<()> {
    let dashboard = source.dashboard()?;
    let output = dashboard.refresh()?;

    print_summary(&output);

    let run_dir = save_artifacts(&output, &dashboard.config().window, &output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());
    Ok(())
}

fn run_picks(path: Option<PathBuf>, toml: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => load_config()?.picks_path,
    };
    let picks = StockPicks::from_file(&path)?;

    if toml {
        print!("{}", picks.to_toml()?);
        return Ok(());
    }

    println!("Picks: {} ({})", path.display(), picks.len());
    println!();
    println!("{:<8} {:<32} {}", "Symbol", "Name", "Image");
    println!("{}", "-".repeat(56));
    for pick in picks.iter() {
        println!(
            "{:<8} {:<32} {}",
            pick.symbol,
            pick.name,
            pick.image.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn print_summary(output: &DashboardOutput) {
    println!("=== {} ===", output.title);
    if output.is_synthetic() {
        println!("*** SYNTHETIC DATA - not market prices ***");
    }
    println!(
        "{}  [{}] {:.0}%",
        output.progress.label(),
        bar(output.progress.fraction, 30),
        output.progress.percent()
    );
    println!(
        "Bars: {} from {} at {}",
        output.bar_count,
        output.source.label(),
        output.fetched_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();
    println!("{:>4}  {:<8} {:<32} {:>9}", "Rank", "Symbol", "Name", "Change");
    println!("{}", "-".repeat(56));
    for m in &output.ranking {
        println!(
            "{:>4}  {:<8} {:<32} {:>9}",
            m.rank,
            m.symbol,
            m.name,
            m.delta()
        );
    }
}

/// Text progress bar `width` cells wide; empty before the start date.
fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}
