//! History collaborator contract

use super::PriceSeries;
use crate::asset::Asset;
use crate::error::{ForecastError, Result};
use std::collections::HashMap;

/// Supplier of close-price history for catalog assets
///
/// Implementations own retrieval and caching. The engines recompute from
/// whatever series they receive on every call.
pub trait HistoryProvider: Send + Sync {
    /// Most recent `days` of history
    fn fetch(&self, asset: &Asset, days: u32) -> Result<PriceSeries>;

    /// Maximal available history (at least `full_history_days` when the source has it)
    fn fetch_full(&self, asset: &Asset, full_history_days: u32) -> Result<PriceSeries> {
        self.fetch(asset, full_history_days)
    }

    /// Live quote, if the source has one fresher than the last close
    fn latest_price(&self, _asset: &Asset) -> Option<f64> {
        None
    }
}

/// Provider backed by series held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    series: HashMap<String, PriceSeries>,
    quotes: HashMap<String, f64>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, asset_id: &str, series: PriceSeries) -> Self {
        self.series.insert(asset_id.to_string(), series);
        self
    }

    pub fn with_quote(mut self, asset_id: &str, price: f64) -> Self {
        self.quotes.insert(asset_id.to_string(), price);
        self
    }
}

impl HistoryProvider for InMemoryHistory {
    fn fetch(&self, asset: &Asset, days: u32) -> Result<PriceSeries> {
        self.series
            .get(&asset.id)
            .map(|s| s.tail_days(days))
            .ok_or_else(|| ForecastError::upstream(&asset.id, "no series loaded"))
    }

    fn latest_price(&self, asset: &Asset) -> Option<f64> {
        self.quotes.get(&asset.id).copied()
    }
}
