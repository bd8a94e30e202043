//! Asset data structures

use crate::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset class driving model and timing-heuristic selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// The crypto asset whose halving schedule anchors market cycles
    FlagshipCrypto,
    /// Any other crypto asset
    Crypto,
    /// Equity indices and similar
    Traditional,
}

impl AssetClass {
    pub fn is_crypto(&self) -> bool {
        matches!(self, AssetClass::FlagshipCrypto | AssetClass::Crypto)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::FlagshipCrypto => "flagship_crypto",
            AssetClass::Crypto => "crypto",
            AssetClass::Traditional => "traditional",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flagship_crypto" => Ok(AssetClass::FlagshipCrypto),
            "crypto" => Ok(AssetClass::Crypto),
            "traditional" => Ok(AssetClass::Traditional),
            other => Err(ForecastError::invalid_request(
                "asset_class",
                format!("unknown asset class {:?}", other),
            )),
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Stable identifier used by requests and history files
    pub id: String,

    /// Display name
    pub name: String,

    /// Exchange symbol
    pub symbol: String,

    pub class: AssetClass,

    /// Quote-provider ticker
    pub ticker: String,

    /// Chart color (hex)
    pub color: String,
}

impl Asset {
    pub fn new(id: &str, name: &str, symbol: &str, class: AssetClass, ticker: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            class,
            ticker: ticker.to_string(),
            color: color.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_classes() {
        assert!(AssetClass::FlagshipCrypto.is_crypto());
        assert!(AssetClass::Crypto.is_crypto());
        assert!(!AssetClass::Traditional.is_crypto());
    }

    #[test]
    fn test_class_parse_roundtrip() {
        for class in [AssetClass::FlagshipCrypto, AssetClass::Crypto, AssetClass::Traditional] {
            assert_eq!(class.as_str().parse::<AssetClass>().unwrap(), class);
        }
        assert!("equity".parse::<AssetClass>().is_err());
    }
}
