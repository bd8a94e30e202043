//! Common model contract and projection output

use crate::error::Result;
use crate::history::PriceSeries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Low/mid/high price estimate for one future year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl PriceBand {
    /// The same price in all three bands
    pub fn flat(price: f64) -> Self {
        Self {
            low: price,
            mid: price,
            high: price,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.low.is_finite() && self.mid.is_finite() && self.high.is_finite()
    }
}

/// Yearly price bands for years 1..=N
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePathProjection {
    bands: Vec<PriceBand>,
}

impl PricePathProjection {
    pub fn new(bands: Vec<PriceBand>) -> Self {
        Self { bands }
    }

    /// Band for 1-based `year`
    pub fn year(&self, year: u32) -> Option<&PriceBand> {
        (year as usize).checked_sub(1).and_then(|i| self.bands.get(i))
    }

    pub fn years(&self) -> u32 {
        self.bands.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn bands(&self) -> &[PriceBand] {
        &self.bands
    }
}

/// Which model produced a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    PowerLawRegression,
    WeightedCagr,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::PowerLawRegression => "power_law_regression",
            ModelType::WeightedCagr => "weighted_cagr",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A price-path model
///
/// Implementations are pure: the projection depends only on the series and horizon.
pub trait PriceModel: Send + Sync {
    fn model_type(&self) -> ModelType;

    /// Project `years` yearly bands forward from the end of `series`
    fn project(&self, asset_id: &str, series: &PriceSeries, years: u32) -> Result<PricePathProjection>;
}
