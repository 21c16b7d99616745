//! Tickerboard TUI - contest dashboard in the terminal.
//!
//! Loads `.env`, builds the contest config, fetches once, then redraws until
//! `q`. `r` re-runs the whole pipeline. Logs go to `tickerboard.log` so they
//! never land on the alternate screen.

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use tickerboard_runner::{ContestConfig, Dashboard, SourceChoice};
use tickerboard_tui::app::StatusLevel;
use tickerboard_tui::{handle_key, ui, Action, App};

#[derive(Parser)]
#[command(name = "tickerboard-tui", about = "Stock-picking contest dashboard")]
struct Args {
    /// Read bars from a `symbol,timestamp,close` CSV instead of Alpaca
    #[arg(long, conflicts_with = "synthetic")]
    csv: Option<PathBuf>,

    /// Use a deterministic random walk (developer mode, not market data)
    #[arg(long)]
    synthetic: bool,

    /// Stock picks file (overrides STOCK_PICKS)
    #[arg(long)]
    picks: Option<PathBuf>,

    /// Log file
    #[arg(long, default_value = "tickerboard.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _ = dotenvy::dotenv();
    init_logging(&args.log_file)?;

    let mut config = ContestConfig::from_env().context("failed to read contest settings")?;
    if let Some(picks) = &args.picks {
        config = config.with_picks_path(picks);
    }
    let source = match (&args.csv, args.synthetic) {
        (Some(path), _) => SourceChoice::Csv(path.clone()),
        (None, true) => SourceChoice::Synthetic,
        (None, false) => SourceChoice::Alpaca,
    };
    let gateway = source.build(&config)?;
    let dashboard = Dashboard::new(config, gateway)?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = App::new(dashboard.config().title.clone());

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &dashboard);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dashboard: &Dashboard,
) -> Result<()> {
    refresh(terminal, app, dashboard)?;

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if handle_key(app, key) == Action::Refresh {
                    refresh(terminal, app, dashboard)?;
                }
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Show a fetching notice, then block on the pipeline.
fn refresh(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dashboard: &Dashboard,
) -> Result<()> {
    app.set_status(
        format!("Fetching from {}...", dashboard.gateway_name()),
        StatusLevel::Info,
    );
    terminal.draw(|f| ui::draw(f, app))?;
    app.apply(dashboard.refresh());
    Ok(())
}
