//! DCA projection request and response shapes

use super::dca::{Frequency, ProjectionPoint};
use super::model::ModelType;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

pub const DCA_DISCLAIMER: &str = "Projections are based on historical data. \
Past performance does not guarantee future results. \
For educational purposes only. Not financial advice.";

/// Longest supported projection
pub const MAX_DURATION_YEARS: u32 = 30;

/// Input for a DCA projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub asset_id: String,

    /// Amount invested per period (must be > 0)
    #[serde(alias = "amount")]
    pub amount_per_period: f64,

    #[serde(default = "default_frequency")]
    pub frequency: Frequency,

    /// Years to simulate, 1..=30
    #[serde(default = "default_duration_years")]
    pub duration_years: u32,
}

fn default_frequency() -> Frequency { Frequency::Monthly }
fn default_duration_years() -> u32 { 5 }

impl ProjectionRequest {
    pub fn new(asset_id: &str, amount_per_period: f64, frequency: Frequency, duration_years: u32) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            amount_per_period,
            frequency,
            duration_years,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount_per_period.is_finite() || self.amount_per_period <= 0.0 {
            return Err(ForecastError::invalid_request(
                "amount_per_period",
                format!("must be a positive amount, got {}", self.amount_per_period),
            ));
        }
        if !(1..=MAX_DURATION_YEARS).contains(&self.duration_years) {
            return Err(ForecastError::invalid_request(
                "duration_years",
                format!("must be within 1..={}, got {}", MAX_DURATION_YEARS, self.duration_years),
            ));
        }
        Ok(())
    }
}

/// Output of a DCA projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcaProjectionResponse {
    pub asset_id: String,
    pub asset_name: String,
    pub amount_per_period: f64,
    pub frequency: Frequency,
    pub duration_years: u32,
    pub projections: Vec<ProjectionPoint>,
    pub model_type: ModelType,
    pub disclaimer: String,
}
