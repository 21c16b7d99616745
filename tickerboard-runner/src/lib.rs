//! Tickerboard Runner - contest config, dashboard pipeline, artifact export.
//!
//! This crate builds on `tickerboard-core` to provide:
//! - `ContestConfig` read from environment lookups
//! - Gateway selection (Alpaca, CSV import, synthetic)
//! - The fetch → transform → progress pipeline with stage-tagged errors
//! - CSV / JSON / Parquet / Markdown artifact export

pub mod config;
pub mod export;
pub mod pipeline;

pub use config::ContestConfig;
pub use export::{generate_report, run_id, save_artifacts, ProgressArtifact};
pub use pipeline::{run_pipeline, Dashboard, DashboardOutput, PipelineError, SourceChoice, Stage};
