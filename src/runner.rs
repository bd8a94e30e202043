//! Forecast runner wiring collaborators to the engines
//!
//! Holds the catalog, config, and providers once, then serves any number of
//! projection and ATH requests. Each request owns the series it fetched, so
//! batches run in parallel without coordination.

use crate::asset::{Asset, AssetCatalog};
use crate::ath::{AthPredictionResponse, AthPredictor};
use crate::config::ForecastConfig;
use crate::error::Result;
use crate::history::{HistoryProvider, PriceSeries};
use crate::projection::{DcaProjectionResponse, ProjectionEngine, ProjectionRequest};
use crate::signals::{fetch_signals_best_effort, SignalProvider};
use chrono::{DateTime, Utc};
use log::warn;
use rayon::prelude::*;

/// Pre-loaded runner for projections and ATH predictions
///
/// # Example
/// ```ignore
/// let runner = ForecastRunner::new(config, CsvHistoryProvider::new("data/history"), signals);
/// let response = runner.project(&ProjectionRequest::new("sp500", 100.0, Frequency::Monthly, 10))?;
/// ```
pub struct ForecastRunner<H, S> {
    catalog: AssetCatalog,
    config: ForecastConfig,
    history: H,
    signals: S,
    projection: ProjectionEngine,
    ath: AthPredictor,
}

impl<H: HistoryProvider, S: SignalProvider> ForecastRunner<H, S> {
    pub fn new(config: ForecastConfig, history: H, signals: S) -> Self {
        Self::with_catalog(AssetCatalog::standard(), config, history, signals)
    }

    pub fn with_catalog(catalog: AssetCatalog, config: ForecastConfig, history: H, signals: S) -> Self {
        Self {
            projection: ProjectionEngine::new(&config),
            ath: AthPredictor::new(&config),
            catalog,
            config,
            history,
            signals,
        }
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Full history, with fetch failures surfacing as an empty series
    fn full_history(&self, asset: &Asset) -> PriceSeries {
        self.history
            .fetch_full(asset, self.config.full_history_days)
            .unwrap_or_else(|e| {
                warn!("history unavailable for {}: {}", asset.id, e);
                PriceSeries::empty()
            })
    }

    /// Run a single DCA projection
    pub fn project(&self, request: &ProjectionRequest) -> Result<DcaProjectionResponse> {
        request.validate()?;
        let asset = self.catalog.get(&request.asset_id)?;
        let series = self.full_history(asset);
        self.projection.project(asset, &series, request)
    }

    /// Run many projections in parallel; results keep request order
    pub fn run_batch(&self, requests: &[ProjectionRequest]) -> Vec<Result<DcaProjectionResponse>> {
        requests.par_iter().map(|r| self.project(r)).collect()
    }

    /// Predict the next ATH as of now
    pub fn predict_ath(&self, asset_id: &str) -> Result<AthPredictionResponse> {
        self.predict_ath_at(asset_id, Utc::now())
    }

    /// Predict the next ATH as of `now`
    pub fn predict_ath_at(&self, asset_id: &str, now: DateTime<Utc>) -> Result<AthPredictionResponse> {
        let asset = self.catalog.get(asset_id)?;
        let series = self.full_history(asset);
        let live_price = self.history.latest_price(asset);
        let signals = fetch_signals_best_effort(&self.signals, asset, self.config.signal_lookback_days);
        self.ath.predict(asset, &series, live_price, signals.as_ref(), now)
    }

    /// ATH predictions for every catalog asset, in catalog order
    pub fn predict_all_at(&self, now: DateTime<Utc>) -> Vec<(String, Result<AthPredictionResponse>)> {
        let ids: Vec<&str> = self.catalog.iter().map(|a| a.id.as_str()).collect();
        ids.par_iter()
            .map(|id| (id.to_string(), self.predict_ath_at(id, now)))
            .collect()
    }
}
