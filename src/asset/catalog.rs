//! The fixed asset catalog

use super::{Asset, AssetClass};
use crate::error::{ForecastError, Result};

/// Lookup table of supported assets, in display order
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    assets: Vec<Asset>,
}

impl AssetCatalog {
    /// The five production assets
    pub fn standard() -> Self {
        Self {
            assets: vec![
                Asset::new("bitcoin", "Bitcoin", "BTC", AssetClass::FlagshipCrypto, "BTC-USD", "#F7931A"),
                Asset::new("ethereum", "Ethereum", "ETH", AssetClass::Crypto, "ETH-USD", "#627EEA"),
                Asset::new("solana", "Solana", "SOL", AssetClass::Crypto, "SOL-USD", "#9945FF"),
                Asset::new("nasdaq", "NASDAQ Composite", "^IXIC", AssetClass::Traditional, "^IXIC", "#0082CA"),
                Asset::new("sp500", "S&P 500", "^GSPC", AssetClass::Traditional, "^GSPC", "#E4002B"),
            ],
        }
    }

    /// Build a catalog from explicit entries (tests, embedding)
    pub fn from_assets(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    pub fn get(&self, asset_id: &str) -> Result<&Asset> {
        self.assets
            .iter()
            .find(|a| a.id == asset_id)
            .ok_or_else(|| ForecastError::AssetNotFound {
                asset_id: asset_id.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
