//! Stock picks registry - the ordered list of contest tickers.
//!
//! Stored as a JSON array (`stock_picks.json`) or a TOML file with `[[picks]]`
//! tables. Order is preserved: it is the pre-ranking column order of the
//! percent-change matrix. Lookups by symbol go through a map built once at
//! load time.

use crate::domain::StockPick;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// TOML layout: `[[picks]]` array of tables.
#[derive(Debug, Serialize, Deserialize)]
struct PicksFile {
    picks: Vec<StockPick>,
}

/// Immutable, validated set of stock picks.
#[derive(Debug, Clone)]
pub struct StockPicks {
    picks: Vec<StockPick>,
    by_symbol: HashMap<String, usize>,
}

impl StockPicks {
    /// Load picks from a `.json` or `.toml` file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PicksNotFound {
                path: path.to_path_buf(),
            });
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::PicksUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let picks = match extension.as_str() {
            "json" => Self::from_json(&content)?,
            "toml" => Self::from_toml(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat { extension }),
        };

        tracing::debug!(path = %path.display(), count = picks.len(), "loaded stock picks");
        Ok(picks)
    }

    /// Parse picks from a JSON array of `{symbol, name, img?}` objects.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let picks: Vec<StockPick> =
            serde_json::from_str(content).map_err(|e| ConfigError::PicksMalformed {
                format: "json",
                reason: e.to_string(),
            })?;
        Self::new(picks)
    }

    /// Parse picks from TOML `[[picks]]` tables.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: PicksFile = toml::from_str(content).map_err(|e| ConfigError::PicksMalformed {
            format: "toml",
            reason: e.to_string(),
        })?;
        Self::new(file.picks)
    }

    /// Validate and index a list of picks.
    ///
    /// Symbols are trimmed and upper-cased. Rejects an empty list, blank
    /// symbols, and duplicates.
    pub fn new(picks: Vec<StockPick>) -> Result<Self, ConfigError> {
        if picks.is_empty() {
            return Err(ConfigError::NoPicks);
        }

        let mut normalized = Vec::with_capacity(picks.len());
        let mut by_symbol = HashMap::with_capacity(picks.len());

        for (index, mut pick) in picks.into_iter().enumerate() {
            pick.symbol = pick.symbol.trim().to_ascii_uppercase();
            if pick.symbol.is_empty() {
                return Err(ConfigError::BlankSymbol { index });
            }
            if by_symbol.insert(pick.symbol.clone(), index).is_some() {
                return Err(ConfigError::DuplicateSymbol {
                    symbol: pick.symbol,
                });
            }
            normalized.push(pick);
        }

        Ok(Self {
            picks: normalized,
            by_symbol,
        })
    }

    /// Symbols in registry order.
    pub fn symbols(&self) -> Vec<&str> {
        self.picks.iter().map(|p| p.symbol.as_str()).collect()
    }

    pub fn get(&self, symbol: &str) -> Option<&StockPick> {
        self.by_symbol.get(symbol).map(|&i| &self.picks[i])
    }

    /// Display name for a symbol.
    pub fn name(&self, symbol: &str) -> Option<&str> {
        self.get(symbol).map(|p| p.name.as_str())
    }

    /// Image for a symbol resolved against `image_dir`, if one was configured.
    pub fn image_path(&self, symbol: &str, image_dir: &Path) -> Option<PathBuf> {
        self.get(symbol).and_then(|p| p.image_path(image_dir))
    }

    /// Registry position of a symbol.
    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.by_symbol.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StockPick> {
        self.picks.iter()
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Serialize back to the TOML `[[picks]]` layout.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let file = PicksFile {
            picks: self.picks.clone(),
        };
        toml::to_string_pretty(&file).map_err(|e| ConfigError::PicksMalformed {
            format: "toml",
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PICKS_JSON: &str = r#"[
        {"symbol": "NVDA", "name": "Alex", "img": "alex.png"},
        {"symbol": "pltr", "name": "Dana"},
        {"symbol": "TSLA", "name": "Sam"}
    ]"#;

    #[test]
    fn json_preserves_order_and_normalizes_symbols() {
        let picks = StockPicks::from_json(PICKS_JSON).unwrap();
        assert_eq!(picks.symbols(), vec!["NVDA", "PLTR", "TSLA"]);
        assert_eq!(picks.name("PLTR"), Some("Dana"));
        assert_eq!(
            picks.image_path("NVDA", Path::new("img")),
            Some(PathBuf::from("img/alex.png"))
        );
        assert_eq!(picks.image_path("TSLA", Path::new("img")), None);
        assert_eq!(picks.position("TSLA"), Some(2));
    }

    #[test]
    fn unknown_symbol_lookup_is_none() {
        let picks = StockPicks::from_json(PICKS_JSON).unwrap();
        assert!(picks.get("AAPL").is_none());
        assert!(!picks.contains("AAPL"));
    }

    #[test]
    fn rejects_duplicates_after_normalization() {
        let json = r#"[{"symbol":"AMD","name":"A"},{"symbol":" amd ","name":"B"}]"#;
        let err = StockPicks::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSymbol { ref symbol } if symbol == "AMD"));
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(matches!(
            StockPicks::from_json("[]").unwrap_err(),
            ConfigError::NoPicks
        ));
        let json = r#"[{"symbol":"AMD","name":"A"},{"symbol":"  ","name":"B"}]"#;
        assert!(matches!(
            StockPicks::from_json(json).unwrap_err(),
            ConfigError::BlankSymbol { index: 1 }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = StockPicks::from_json(r#"[{"symbol": "AMD"}]"#).unwrap_err();
        assert!(matches!(err, ConfigError::PicksMalformed { format: "json", .. }));
    }

    #[test]
    fn toml_roundtrip() {
        let picks = StockPicks::from_json(PICKS_JSON).unwrap();
        let toml_str = picks.to_toml().unwrap();
        let parsed = StockPicks::from_toml(&toml_str).unwrap();
        assert_eq!(parsed.symbols(), picks.symbols());
        assert_eq!(parsed.get("NVDA").unwrap().image.as_deref(), Some("alex.png"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = StockPicks::from_file(Path::new("/nonexistent/stock_picks.json")).unwrap_err();
        assert!(matches!(err, ConfigError::PicksNotFound { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "tickerboard_picks_{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, "picks: []").unwrap();
        let err = StockPicks::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { ref extension } if extension == "yaml"));
        let _ = std::fs::remove_file(&path);
    }
}
