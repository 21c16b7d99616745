//! Alpaca market data gateway.
//!
//! Fetches historical bars for many symbols at once from Alpaca's v2
//! `stocks/bars` endpoint and follows `next_page_token` until the result set
//! is exhausted, as the vendor SDK does. There is no retry: any HTTP or
//! parse failure ends the fetch.

use super::provider::{within_range, DataSource, GatewayError, MarketDataGateway};
use crate::domain::{Bar, BarInterval};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://data.alpaca.markets";
pub const DEFAULT_FEED: &str = "iex";

/// Maximum page size accepted by the bars endpoint.
const PAGE_LIMIT: u32 = 10_000;

/// Upper bound on pages per fetch; a contest window never gets close.
const MAX_PAGES: usize = 1_000;

/// API key pair. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AlpacaCredentials {
    pub key_id: String,
    pub secret_key: String,
}

impl fmt::Debug for AlpacaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlpacaCredentials")
            .field("key_id", &self.key_id)
            .field("secret_key", &"***")
            .finish()
    }
}

/// Connection settings for the Alpaca data API.
#[derive(Debug, Clone)]
pub struct AlpacaSettings {
    pub credentials: AlpacaCredentials,
    pub base_url: String,
    /// Data feed: `iex` (free) or `sip`.
    pub feed: String,
    pub timeout: Duration,
}

impl AlpacaSettings {
    pub fn new(credentials: AlpacaCredentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            feed: DEFAULT_FEED.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// One page of the multi-symbol bars response.
#[derive(Debug, Deserialize)]
struct BarsPage {
    #[serde(default)]
    bars: Option<BTreeMap<String, Vec<AlpacaBar>>>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Wire bar. Only the timestamp and close are used.
#[derive(Debug, Deserialize)]
struct AlpacaBar {
    #[serde(rename = "t")]
    timestamp: DateTime<Utc>,
    #[serde(rename = "c")]
    close: f64,
}

/// Error body returned with 4xx responses.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Alpaca historical bars gateway.
pub struct AlpacaGateway {
    client: reqwest::blocking::Client,
    settings: AlpacaSettings,
}

impl AlpacaGateway {
    pub fn new(settings: AlpacaSettings) -> Result<Self, GatewayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("tickerboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::NetworkUnreachable(format!("build HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    fn bars_url(&self) -> String {
        format!("{}/v2/stocks/bars", self.settings.base_url.trim_end_matches('/'))
    }

    /// Query parameters for one page.
    fn page_params(
        &self,
        symbols: &[&str],
        interval: BarInterval,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        page_token: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbols", symbols.join(",")),
            ("timeframe", interval.as_timeframe()),
            ("start", start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("limit", PAGE_LIMIT.to_string()),
            ("adjustment", "raw".to_string()),
            ("feed", self.settings.feed.clone()),
            ("sort", "asc".to_string()),
        ];
        if let Some(end) = end {
            params.push(("end", end.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(token) = page_token {
            params.push(("page_token", token.to_string()));
        }
        params
    }

    /// Execute one page request and map HTTP failures.
    fn fetch_page(&self, params: &[(&'static str, String)]) -> Result<BarsPage, GatewayError> {
        let resp = self
            .client
            .get(self.bars_url())
            .header("APCA-API-KEY-ID", &self.settings.credentials.key_id)
            .header("APCA-API-SECRET-KEY", &self.settings.credentials.secret_key)
            .query(params)
            .send()
            .map_err(|e| GatewayError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(GatewayError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(map_status(status.as_u16(), &body));
        }

        let body = resp
            .text()
            .map_err(|e| GatewayError::NetworkUnreachable(format!("read body: {e}")))?;
        parse_page(&body)
    }
}

impl MarketDataGateway for AlpacaGateway {
    fn name(&self) -> &str {
        "alpaca"
    }

    fn source(&self) -> DataSource {
        DataSource::Alpaca
    }

    fn fetch(
        &self,
        symbols: &[&str],
        interval: BarInterval,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Bar>, GatewayError> {
        if symbols.is_empty() {
            return Err(GatewayError::InvalidRequest("no symbols requested".into()));
        }

        let mut bars = Vec::new();
        let mut page_token: Option<String> = None;

        for page_no in 0..MAX_PAGES {
            let params = self.page_params(symbols, interval, start, end, page_token.as_deref());
            let page = self.fetch_page(&params)?;

            let before = bars.len();
            collect_bars(page.bars, &mut bars);
            tracing::debug!(page = page_no, bars = bars.len() - before, "fetched bars page");

            match page.next_page_token {
                Some(next) if Some(&next) == page_token.as_ref() => {
                    return Err(GatewayError::ResponseFormatChanged(format!(
                        "page token {next} repeated"
                    )));
                }
                Some(next) => page_token = Some(next),
                None => {
                    bars.retain(|b| within_range(b, start, end));
                    tracing::info!(
                        symbols = symbols.len(),
                        bars = bars.len(),
                        interval = %interval,
                        "alpaca fetch complete"
                    );
                    return Ok(bars);
                }
            }
        }

        Err(GatewayError::ResponseFormatChanged(format!(
            "more than {MAX_PAGES} pages of bars"
        )))
    }
}

/// Parse a bars page body.
fn parse_page(body: &str) -> Result<BarsPage, GatewayError> {
    serde_json::from_str(body)
        .map_err(|e| GatewayError::ResponseFormatChanged(format!("failed to parse bars page: {e}")))
}

/// Flatten a page's per-symbol bar lists into domain bars.
fn collect_bars(page: Option<BTreeMap<String, Vec<AlpacaBar>>>, out: &mut Vec<Bar>) {
    for (symbol, wire_bars) in page.unwrap_or_default() {
        out.extend(
            wire_bars
                .into_iter()
                .map(|b| Bar::new(symbol.clone(), b.timestamp, b.close)),
        );
    }
}

/// Map a non-success status to a gateway error.
fn map_status(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        401 | 403 => GatewayError::AuthenticationFailed(message),
        400 | 422 => {
            if let Some(symbol) = invalid_symbol(&message) {
                GatewayError::SymbolNotFound { symbol }
            } else {
                GatewayError::InvalidRequest(message)
            }
        }
        404 => GatewayError::InvalidRequest(format!("endpoint not found: {message}")),
        _ => GatewayError::Http {
            status,
            body: message,
        },
    }
}

/// Extract the symbol from messages like `invalid symbol: FOO`.
fn invalid_symbol(message: &str) -> Option<String> {
    let lower = message.to_ascii_lowercase();
    let idx = lower.find("invalid symbol")?;
    let rest = message[idx + "invalid symbol".len()..].trim_start_matches(&[':', ' '][..]);
    let symbol: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '/')
        .collect();
    (!symbol.is_empty()).then_some(symbol)
}
