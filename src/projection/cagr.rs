//! Multi-window compound-growth model for traditional assets

use super::model::{ModelType, PriceBand, PriceModel, PricePathProjection};
use crate::config::{CagrWindow, ForecastConfig};
use crate::error::{ForecastError, Result};
use crate::history::PriceSeries;
use crate::stats::std_dev;
use log::debug;

/// Blended growth rate and annualized volatility for one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CagrBlend {
    /// Last close
    pub current: f64,

    /// Weight-renormalized CAGR over the covered windows
    pub cagr: f64,

    /// Std dev of daily log returns, annualized
    pub volatility: f64,

    /// Number of windows the history covered
    pub windows_used: usize,
}

impl CagrBlend {
    pub fn band(&self, year: u32) -> PriceBand {
        let mid = self.current * (1.0 + self.cagr).powi(year as i32);
        let spread = self.volatility * (year as f64).sqrt();
        PriceBand {
            low: mid * (-spread).exp(),
            mid,
            high: mid * spread.exp(),
        }
    }
}

/// Weighted-CAGR projection
#[derive(Debug, Clone)]
pub struct CagrBlendModel {
    windows: Vec<CagrWindow>,
    default_cagr: f64,
    trading_days_per_year: f64,
}

impl CagrBlendModel {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            windows: config.cagr_windows.clone(),
            default_cagr: config.default_cagr,
            trading_days_per_year: config.trading_days_per_year,
        }
    }

    pub fn blend(&self, asset_id: &str, closes: &[f64]) -> Result<CagrBlend> {
        let positive: Vec<f64> = closes.iter().copied().filter(|&p| p > 0.0).collect();
        if positive.len() < 2 {
            return Err(ForecastError::insufficient(
                asset_id,
                format!("volatility needs 2 positive prices, have {}", positive.len()),
            ));
        }

        let current = match closes.last() {
            Some(&p) if p > 0.0 => p,
            _ => return Err(ForecastError::insufficient(asset_id, "last price is not positive")),
        };

        let n = closes.len();
        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        let mut windows_used = 0;

        for window in &self.windows {
            let days = window.days();
            if n < days {
                continue;
            }
            let start = closes[n - days];
            if start <= 0.0 {
                debug!("{}: skipping {}y window, start price {}", asset_id, window.years, start);
                continue;
            }
            let cagr = (current / start).powf(1.0 / window.years as f64) - 1.0;
            weighted += cagr * window.weight;
            total_weight += window.weight;
            windows_used += 1;
        }

        let cagr = if total_weight > 0.0 {
            weighted / total_weight
        } else {
            self.default_cagr
        };

        let log_returns: Vec<f64> = positive.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
        let volatility = std_dev(&log_returns).unwrap_or(0.0) * self.trading_days_per_year.sqrt();

        if !cagr.is_finite() || !volatility.is_finite() {
            return Err(ForecastError::insufficient(asset_id, "non-finite growth statistics"));
        }

        Ok(CagrBlend {
            current,
            cagr,
            volatility,
            windows_used,
        })
    }
}

impl Default for CagrBlendModel {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}

impl PriceModel for CagrBlendModel {
    fn model_type(&self) -> ModelType {
        ModelType::WeightedCagr
    }

    fn project(&self, asset_id: &str, series: &PriceSeries, years: u32) -> Result<PricePathProjection> {
        let blend = self.blend(asset_id, &series.closes())?;
        debug!(
            "{} CAGR blend: cagr={:.4} vol={:.4} windows={}",
            asset_id, blend.cagr, blend.volatility, blend.windows_used
        );

        let bands: Vec<PriceBand> = (1..=years).map(|y| blend.band(y)).collect();
        if bands.iter().any(|b| !b.is_finite()) {
            return Err(ForecastError::insufficient(asset_id, "CAGR projection overflowed"));
        }
        Ok(PricePathProjection::new(bands))
    }
}
