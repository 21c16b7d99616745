//! StockPick - one contestant's ticker.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single entry in the stock picks list.
///
/// `image` is a file name relative to the configured image directory.
/// The JSON source historically used the key `img`, which is still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPick {
    pub symbol: String,
    pub name: String,
    #[serde(default, alias = "img", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl StockPick {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Legend label: `"SYMBOL (Name)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.symbol, self.name)
    }

    /// Resolve the image reference against an image directory.
    pub fn image_path(&self, image_dir: &Path) -> Option<PathBuf> {
        self.image.as_ref().map(|img| image_dir.join(img))
    }
}
