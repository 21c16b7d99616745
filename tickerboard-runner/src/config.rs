//! Contest configuration, read once from the process environment.
//!
//! Binaries load `.env` first; this module only looks values up. Every
//! setting is a plain string key:
//!
//! | key | required | default |
//! |---|---|---|
//! | `START_DATE`, `END_DATE` | yes | |
//! | `ALPACA_API_KEY`, `ALPACA_SECRET_KEY` | for the Alpaca gateway | |
//! | `BAR_INTERVAL` | no | `1Day` |
//! | `CONTEST_TITLE` | no | `Tabula Tickers` |
//! | `STOCK_PICKS` | no | `stock_picks.json` |
//! | `IMAGE_DIR` | no | `img` |
//! | `ALPACA_DATA_URL` | no | `https://data.alpaca.markets` |
//! | `ALPACA_FEED` | no | `iex` |

use std::path::{Path, PathBuf};

use tickerboard_core::data::alpaca::{DEFAULT_BASE_URL, DEFAULT_FEED};
use tickerboard_core::data::{AlpacaCredentials, AlpacaSettings};
use tickerboard_core::domain::BarInterval;
use tickerboard_core::{ConfigError, ContestWindow, StockPicks, TransformOptions};

pub const DEFAULT_TITLE: &str = "Tabula Tickers";
pub const DEFAULT_PICKS_FILE: &str = "stock_picks.json";
pub const DEFAULT_IMAGE_DIR: &str = "img";

/// Everything a dashboard run needs besides the gateway itself.
#[derive(Debug, Clone)]
pub struct ContestConfig {
    pub title: String,
    pub window: ContestWindow,
    pub interval: BarInterval,
    pub picks_path: PathBuf,
    pub image_dir: PathBuf,
    /// `None` when either key is unset; only the Alpaca gateway needs them.
    pub credentials: Option<AlpacaCredentials>,
    pub data_url: String,
    pub feed: String,
    pub transform: TransformOptions,
}

impl ContestConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::MissingSetting { key });

        let window = ContestWindow::parse(&require("START_DATE")?, &require("END_DATE")?)?;

        let interval = match get("BAR_INTERVAL") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidSetting {
                key: "BAR_INTERVAL",
                reason: format!("{e}"),
            })?,
            None => BarInterval::default(),
        };

        let credentials = match (get("ALPACA_API_KEY"), get("ALPACA_SECRET_KEY")) {
            (Some(key_id), Some(secret_key)) => Some(AlpacaCredentials { key_id, secret_key }),
            _ => None,
        };

        let config = Self {
            title: get("CONTEST_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            window,
            interval,
            picks_path: PathBuf::from(
                get("STOCK_PICKS").unwrap_or_else(|| DEFAULT_PICKS_FILE.to_string()),
            ),
            image_dir: PathBuf::from(
                get("IMAGE_DIR").unwrap_or_else(|| DEFAULT_IMAGE_DIR.to_string()),
            ),
            credentials,
            data_url: get("ALPACA_DATA_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            feed: get("ALPACA_FEED").unwrap_or_else(|| DEFAULT_FEED.to_string()),
            transform: TransformOptions::default(),
        };

        tracing::debug!(
            title = %config.title,
            start = %config.window.start(),
            end = %config.window.end(),
            interval = %config.interval,
            picks = %config.picks_path.display(),
            "loaded contest config"
        );
        Ok(config)
    }

    /// Replace the picks file path.
    pub fn with_picks_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.picks_path = path.into();
        self
    }

    pub fn with_transform(mut self, transform: TransformOptions) -> Self {
        self.transform = transform;
        self
    }

    /// Load the stock picks registry named by this config.
    pub fn load_picks(&self) -> Result<StockPicks, ConfigError> {
        StockPicks::from_file(&self.picks_path)
    }

    /// Connection settings for the Alpaca gateway. Fails when a key is unset.
    pub fn alpaca_settings(&self) -> Result<AlpacaSettings, ConfigError> {
        let credentials = self.credentials.clone().ok_or(ConfigError::MissingSetting {
            key: "ALPACA_API_KEY / ALPACA_SECRET_KEY",
        })?;
        let mut settings = AlpacaSettings::new(credentials);
        settings.base_url = self.data_url.clone();
        settings.feed = self.feed.clone();
        Ok(settings)
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const DATES: [(&str, &str); 2] = [("START_DATE", "2024-11-04"), ("END_DATE", "2024-12-04")];

    #[test]
    fn defaults_fill_optional_settings() {
        let config = ContestConfig::from_lookup(lookup(&DATES)).unwrap();
        assert_eq!(config.title, "Tabula Tickers");
        assert_eq!(config.interval, BarInterval::Day);
        assert_eq!(config.picks_path, PathBuf::from("stock_picks.json"));
        assert_eq!(config.image_dir(), Path::new("img"));
        assert_eq!(config.data_url, DEFAULT_BASE_URL);
        assert_eq!(config.feed, "iex");
        assert!(config.credentials.is_none());
        assert_eq!(config.window.days_total(), 30);
    }

    #[test]
    fn missing_start_date_is_reported_by_key() {
        let err = ContestConfig::from_lookup(lookup(&[("END_DATE", "2024-12-04")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting { key: "START_DATE" }));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = ContestConfig::from_lookup(lookup(&[
            ("START_DATE", "2024-11-04"),
            ("END_DATE", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting { key: "END_DATE" }));
    }

    #[test]
    fn malformed_date_is_invalid_setting() {
        let err = ContestConfig::from_lookup(lookup(&[
            ("START_DATE", "11/04/2024"),
            ("END_DATE", "2024-12-04"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { key: "START_DATE", .. }));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = ContestConfig::from_lookup(lookup(&[
            ("START_DATE", "2024-12-04"),
            ("END_DATE", "2024-11-04"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidContestWindow { .. }));
    }

    #[test]
    fn optional_settings_override_defaults() {
        let config = ContestConfig::from_lookup(lookup(&[
            DATES[0],
            DATES[1],
            ("BAR_INTERVAL", "4Hour"),
            ("CONTEST_TITLE", "Office Pool"),
            ("STOCK_PICKS", "picks.toml"),
            ("ALPACA_API_KEY", "key"),
            ("ALPACA_SECRET_KEY", "secret"),
            ("ALPACA_FEED", "sip"),
        ]))
        .unwrap();
        assert_eq!(config.interval, BarInterval::Hour(4));
        assert_eq!(config.title, "Office Pool");
        assert_eq!(config.picks_path, PathBuf::from("picks.toml"));

        let settings = config.alpaca_settings().unwrap();
        assert_eq!(settings.credentials.key_id, "key");
        assert_eq!(settings.feed, "sip");
    }

    #[test]
    fn bad_interval_is_invalid_setting() {
        let err = ContestConfig::from_lookup(lookup(&[
            DATES[0],
            DATES[1],
            ("BAR_INTERVAL", "fortnightly"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { key: "BAR_INTERVAL", .. }));
    }

    #[test]
    fn alpaca_settings_need_both_keys() {
        let config = ContestConfig::from_lookup(lookup(&[
            DATES[0],
            DATES[1],
            ("ALPACA_API_KEY", "key"),
        ]))
        .unwrap();
        assert!(config.credentials.is_none());
        assert!(matches!(
            config.alpaca_settings(),
            Err(ConfigError::MissingSetting { .. })
        ));
    }
}
