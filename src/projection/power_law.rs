//! Log-log regression model for assets with power-law-like growth
//!
//! Fits ln(P) = a * ln(t) + b over the 1-based daily index t, then projects
//! t' = n + 365 * Y with a one-sigma band from the residual spread.

use super::model::{ModelType, PriceBand, PriceModel, PricePathProjection};
use crate::config::DAYS_PER_YEAR;
use crate::error::{ForecastError, Result};
use crate::history::PriceSeries;
use crate::stats::{linear_regression, std_dev};
use log::debug;

/// Fitted power-law parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawFit {
    /// Exponent `a`
    pub slope: f64,

    /// `b` = ln of the scale constant
    pub intercept: f64,

    /// Population std dev of ln(price) residuals
    pub sigma: f64,

    /// Length of the input series, including dropped samples
    pub samples: usize,
}

impl PowerLawFit {
    /// Fit over `closes`; non-positive prices are dropped but keep their time index
    pub fn fit(asset_id: &str, closes: &[f64]) -> Result<Self> {
        let (ln_t, ln_p): (Vec<f64>, Vec<f64>) = closes
            .iter()
            .enumerate()
            .filter(|(_, &p)| p > 0.0)
            .map(|(i, &p)| (((i + 1) as f64).ln(), p.ln()))
            .unzip();

        if ln_t.len() < 2 {
            return Err(ForecastError::insufficient(
                asset_id,
                format!("power-law fit needs 2 positive prices, have {}", ln_t.len()),
            ));
        }

        let line = linear_regression(&ln_t, &ln_p).ok_or_else(|| {
            ForecastError::insufficient(asset_id, "power-law regression is degenerate")
        })?;

        let residuals: Vec<f64> = ln_t
            .iter()
            .zip(&ln_p)
            .map(|(&x, &y)| y - line.predict(x))
            .collect();
        let sigma = std_dev(&residuals).unwrap_or(0.0);

        if !sigma.is_finite() {
            return Err(ForecastError::insufficient(asset_id, "non-finite residual spread"));
        }

        Ok(Self {
            slope: line.slope,
            intercept: line.intercept,
            sigma,
            samples: closes.len(),
        })
    }

    /// Band for future year `year`
    pub fn band(&self, year: u32) -> PriceBand {
        let future_t = (self.samples + (DAYS_PER_YEAR * year) as usize) as f64;
        let ln_mid = self.slope * future_t.ln() + self.intercept;
        PriceBand {
            low: (ln_mid - self.sigma).exp(),
            mid: ln_mid.exp(),
            high: (ln_mid + self.sigma).exp(),
        }
    }
}

/// Power-law regression projection, used for crypto assets
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerLawModel;

impl PowerLawModel {
    pub fn new() -> Self {
        Self
    }
}

impl PriceModel for PowerLawModel {
    fn model_type(&self) -> ModelType {
        ModelType::PowerLawRegression
    }

    fn project(&self, asset_id: &str, series: &PriceSeries, years: u32) -> Result<PricePathProjection> {
        let fit = PowerLawFit::fit(asset_id, &series.closes())?;
        debug!(
            "{} power-law fit: slope={:.4} intercept={:.4} sigma={:.4}",
            asset_id, fit.slope, fit.intercept, fit.sigma
        );

        let bands: Vec<PriceBand> = (1..=years).map(|y| fit.band(y)).collect();
        if bands.iter().any(|b| !b.is_finite()) {
            return Err(ForecastError::insufficient(asset_id, "power-law projection overflowed"));
        }
        Ok(PricePathProjection::new(bands))
    }
}
