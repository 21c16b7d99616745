//! Dashboard pipeline - registry, gateway, transform, progress.
//!
//! One run is strictly sequential:
//! 1. Picks are loaded once when the [`Dashboard`] is built (config stage)
//! 2. `refresh()` fetches every pick's bars in a single gateway call (fetch stage)
//! 3. The complete bar set goes through the transform (transform stage)
//! 4. Progress is computed from the contest window and the wall clock
//!
//! Any failure ends the run; nothing from a failed run is returned.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tickerboard_core::data::{
    AlpacaGateway, CsvGateway, DataSource, GatewayError, MarketDataGateway, SyntheticGateway,
};
use tickerboard_core::transform::attach_images;
use tickerboard_core::{
    normalize, ConfigError, DataError, PercentChangeMatrix, Progress, RankedMetric, StockPicks,
};

use crate::config::ContestConfig;

/// Pipeline stage a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Fetch,
    Transform,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Config => "config",
            Stage::Fetch => "fetch",
            Stage::Transform => "transform",
        })
    }
}

/// Errors from the pipeline, tagged with their stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config stage: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch stage ({gateway}): {source}")]
    Fetch {
        gateway: String,
        #[source]
        source: GatewayError,
    },

    #[error("transform stage: {0}")]
    Transform(#[from] DataError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Config(_) => Stage::Config,
            PipelineError::Fetch { .. } => Stage::Fetch,
            PipelineError::Transform(_) => Stage::Transform,
        }
    }
}

/// Everything the presentation layer draws from one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOutput {
    pub title: String,
    pub matrix: PercentChangeMatrix,
    pub ranking: Vec<RankedMetric>,
    pub progress: Progress,
    pub fetched_at: DateTime<Utc>,
    pub source: DataSource,
    pub bar_count: usize,
}

impl DashboardOutput {
    /// `true` when the numbers did not come from a real market feed.
    pub fn is_synthetic(&self) -> bool {
        self.source == DataSource::Synthetic
    }
}

/// Which gateway a binary should build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceChoice {
    #[default]
    Alpaca,
    Csv(PathBuf),
    /// Developer-only random walk.
    Synthetic,
}

impl SourceChoice {
    /// Build the gateway. Alpaca needs both API keys in the config.
    pub fn build(&self, config: &ContestConfig) -> Result<Box<dyn MarketDataGateway>, PipelineError> {
        match self {
            SourceChoice::Alpaca => {
                let settings = config.alpaca_settings()?;
                let gateway = AlpacaGateway::new(settings).map_err(|source| PipelineError::Fetch {
                    gateway: "alpaca".to_string(),
                    source,
                })?;
                Ok(Box::new(gateway))
            }
            SourceChoice::Csv(path) => Ok(Box::new(CsvGateway::new(path.clone()))),
            SourceChoice::Synthetic => Ok(Box::new(SyntheticGateway::new())),
        }
    }
}

/// A configured dashboard: config, loaded picks and a gateway.
pub struct Dashboard {
    config: ContestConfig,
    picks: StockPicks,
    gateway: Box<dyn MarketDataGateway>,
}

impl Dashboard {
    /// Load the picks file named by `config`.
    pub fn new(
        config: ContestConfig,
        gateway: Box<dyn MarketDataGateway>,
    ) -> Result<Self, PipelineError> {
        let picks = config.load_picks()?;
        tracing::info!(
            picks = picks.len(),
            path = %config.picks_path.display(),
            gateway = gateway.name(),
            "dashboard ready"
        );
        Ok(Self::with_picks(config, picks, gateway))
    }

    pub fn with_picks(
        config: ContestConfig,
        picks: StockPicks,
        gateway: Box<dyn MarketDataGateway>,
    ) -> Self {
        Self {
            config,
            picks,
            gateway,
        }
    }

    pub fn config(&self) -> &ContestConfig {
        &self.config
    }

    pub fn picks(&self) -> &StockPicks {
        &self.picks
    }

    pub fn gateway_name(&self) -> &str {
        self.gateway.name()
    }

    /// Run the pipeline against the local wall clock.
    pub fn refresh(&self) -> Result<DashboardOutput, PipelineError> {
        self.refresh_at(chrono::Local::now().naive_local())
    }

    /// Run the pipeline with progress measured at `now`.
    pub fn refresh_at(&self, now: NaiveDateTime) -> Result<DashboardOutput, PipelineError> {
        run_pipeline(&self.config, &self.picks, self.gateway.as_ref(), now)
    }
}

/// One full pass: fetch, transform, progress.
pub fn run_pipeline(
    config: &ContestConfig,
    picks: &StockPicks,
    gateway: &dyn MarketDataGateway,
    now: NaiveDateTime,
) -> Result<DashboardOutput, PipelineError> {
    let symbols = picks.symbols();
    let start = config.window.start_datetime();

    tracing::info!(
        gateway = gateway.name(),
        symbols = symbols.len(),
        interval = %config.interval,
        start = %start,
        "fetching bars"
    );
    let bars = gateway
        .fetch(&symbols, config.interval, start, None)
        .map_err(|source| PipelineError::Fetch {
            gateway: gateway.name().to_string(),
            source,
        })?;
    let fetched_at = Utc::now();

    let mut output = normalize(&bars, picks, &config.transform)?;
    attach_images(&mut output.ranking, picks, config.image_dir());
    let progress = config.window.progress_at(now);

    tracing::info!(
        bars = bars.len(),
        days_passed = progress.days_passed,
        days_total = progress.days_total,
        "pipeline complete"
    );

    Ok(DashboardOutput {
        title: config.title.clone(),
        matrix: output.matrix,
        ranking: output.ranking,
        progress,
        fetched_at,
        source: gateway.source(),
        bar_count: bars.len(),
    })
}
