//! Projection pipeline: model selection, price-path projection, DCA simulation

use super::dca::DcaSimulator;
use super::request::{DcaProjectionResponse, ProjectionRequest, DCA_DISCLAIMER};
use super::selector::{AssetClassSelector, ModelSelector};
use crate::asset::Asset;
use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::history::PriceSeries;
use log::info;

/// Main projection engine
pub struct ProjectionEngine<M = AssetClassSelector> {
    selector: M,
    min_history_samples: usize,
}

impl ProjectionEngine<AssetClassSelector> {
    /// Create an engine with the standard class-based model selector
    pub fn new(config: &ForecastConfig) -> Self {
        Self::with_selector(AssetClassSelector::new(config), config)
    }
}

impl<M: ModelSelector> ProjectionEngine<M> {
    pub fn with_selector(selector: M, config: &ForecastConfig) -> Self {
        Self {
            selector,
            min_history_samples: config.min_history_samples,
        }
    }

    /// Run a projection for `asset` over a history it does not retain
    pub fn project(
        &self,
        asset: &Asset,
        series: &PriceSeries,
        request: &ProjectionRequest,
    ) -> Result<DcaProjectionResponse> {
        request.validate()?;

        if series.len() < self.min_history_samples {
            return Err(ForecastError::insufficient(
                &asset.id,
                format!("need {} samples, have {}", self.min_history_samples, series.len()),
            ));
        }
        let current_price = match series.last_close() {
            Some(p) if p > 0.0 => p,
            _ => return Err(ForecastError::insufficient(&asset.id, "last close is not positive")),
        };

        let model = self.selector.select(asset.class);
        let projection = model.project(&asset.id, series, request.duration_years)?;

        let simulator = DcaSimulator::new(
            request.amount_per_period,
            request.frequency,
            request.duration_years,
        );
        let points = simulator.simulate(current_price, &projection);

        info!(
            "projected {} with {} over {} years ({} samples)",
            asset.id,
            model.model_type(),
            request.duration_years,
            series.len()
        );

        Ok(DcaProjectionResponse {
            asset_id: asset.id.clone(),
            asset_name: asset.name.clone(),
            amount_per_period: request.amount_per_period,
            frequency: request.frequency,
            duration_years: request.duration_years,
            projections: points,
            model_type: model.model_type(),
            disclaimer: DCA_DISCLAIMER.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetCatalog;
    use crate::projection::{Frequency, ModelType};
    use chrono::{TimeZone, Utc};

    fn series(closes: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2000, 1, 3, 0, 0, 0).unwrap();
        PriceSeries::daily(start, closes).unwrap()
    }

    #[test]
    fn test_flat_series_value_equals_invested() {
        let catalog = AssetCatalog::standard();
        let engine = ProjectionEngine::new(&ForecastConfig::default());
        let request = ProjectionRequest::new("sp500", 100.0, Frequency::Monthly, 5);

        let response = engine
            .project(catalog.get("sp500").unwrap(), &series(&vec![50.0; 2000]), &request)
            .unwrap();

        assert_eq!(response.model_type, ModelType::WeightedCagr);
        assert_eq!(response.projections.len(), 5);
        for p in &response.projections {
            assert_eq!(p.total_invested, 1200.0 * p.year as f64);
            assert_eq!(p.portfolio_value_low, p.total_invested);
            assert_eq!(p.portfolio_value_mid, p.total_invested);
            assert_eq!(p.portfolio_value_high, p.total_invested);
        }
    }

    #[test]
    fn test_crypto_uses_power_law() {
        let catalog = AssetCatalog::standard();
        let engine = ProjectionEngine::new(&ForecastConfig::default());
        let closes: Vec<f64> = (1..=500).map(|t| 0.1 * (t as f64).powf(2.0)).collect();
        let request = ProjectionRequest::new("ethereum", 50.0, Frequency::Weekly, 3);

        let response = engine
            .project(catalog.get("ethereum").unwrap(), &series(&closes), &request)
            .unwrap();
        assert_eq!(response.model_type, ModelType::PowerLawRegression);
        assert_eq!(response.asset_name, "Ethereum");
        assert_eq!(response.projections[2].total_invested, 50.0 * 52.0 * 3.0);
    }

    #[test]
    fn test_short_history_rejected() {
        let catalog = AssetCatalog::standard();
        let engine = ProjectionEngine::new(&ForecastConfig::default());
        let request = ProjectionRequest::new("sp500", 100.0, Frequency::Monthly, 5);
        let err = engine
            .project(catalog.get("sp500").unwrap(), &series(&[10.0; 29]), &request)
            .unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientData { .. }));

        let err = engine
            .project(catalog.get("sp500").unwrap(), &PriceSeries::empty(), &request)
            .unwrap_err();
        assert!(err.is_data_shortage());
    }

    #[test]
    fn test_all_non_positive_is_insufficient() {
        let catalog = AssetCatalog::standard();
        let engine = ProjectionEngine::new(&ForecastConfig::default());
        let request = ProjectionRequest::new("bitcoin", 100.0, Frequency::Monthly, 5);
        let err = engine
            .project(catalog.get("bitcoin").unwrap(), &series(&[0.0; 40]), &request)
            .unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientData { .. }));
    }
}
