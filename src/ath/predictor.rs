//! ATH prediction pipeline

use super::{ConfidenceAdjuster, DateRange, EventDetector, MagnitudePredictor, TimingInput, TimingStrategy};
use crate::asset::Asset;
use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::history::PriceSeries;
use crate::signals::SignalSet;
use crate::stats::round_to;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

pub const ATH_DISCLAIMER: &str = "ATH predictions are speculative and based on historical patterns. \
Cryptocurrency investments are highly volatile. Not financial advice.";

/// Output of an ATH prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthPredictionResponse {
    pub asset_id: String,
    pub asset_name: String,
    pub current_price: f64,
    pub current_ath: f64,
    pub predicted_next_ath: f64,
    pub predicted_date_range: DateRange,
    pub confidence: f64,
    pub factors: Vec<String>,
    pub disclaimer: String,
}

/// Event detection, magnitude, timing, and confidence in one pass
#[derive(Debug, Clone)]
pub struct AthPredictor {
    config: ForecastConfig,
    detector: EventDetector,
    magnitude: MagnitudePredictor,
    adjuster: ConfidenceAdjuster,
}

impl AthPredictor {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            config: config.clone(),
            detector: EventDetector::new(config.ath_target_events),
            magnitude: MagnitudePredictor::new(config),
            adjuster: ConfidenceAdjuster::default(),
        }
    }

    /// Predict the next ATH as of `now`
    ///
    /// `live_price` overrides the last close when the history source has a fresher quote.
    pub fn predict(
        &self,
        asset: &Asset,
        series: &PriceSeries,
        live_price: Option<f64>,
        signals: Option<&SignalSet>,
        now: DateTime<Utc>,
    ) -> Result<AthPredictionResponse> {
        if series.len() < self.config.min_history_samples {
            return Err(ForecastError::insufficient(
                &asset.id,
                format!("need {} samples, have {}", self.config.min_history_samples, series.len()),
            ));
        }
        let current_ath = match series.max_close() {
            Some(ath) if ath > 0.0 => ath,
            _ => return Err(ForecastError::insufficient(&asset.id, "no positive prices")),
        };
        let usable = |p: &f64| p.is_finite() && *p > 0.0;
        let current_price = live_price
            .filter(usable)
            .or_else(|| series.last_close().filter(usable))
            .unwrap_or(current_ath);

        let events = self.detector.detect(series);
        let predicted_next_ath = self.magnitude.predict(current_ath, &events);

        let strategy = TimingStrategy::for_class(asset.class, &self.config);
        let outcome = strategy.predict(&TimingInput {
            now,
            events: &events,
            current_price,
            current_ath,
        });
        let outcome = self.adjuster.apply(outcome, signals);

        info!(
            "{}: {} ATH events, next ATH {:.2}, confidence {:.2}",
            asset.id,
            events.len(),
            predicted_next_ath,
            outcome.confidence
        );

        Ok(AthPredictionResponse {
            asset_id: asset.id.clone(),
            asset_name: asset.name.clone(),
            current_price: round_to(current_price, 2),
            current_ath: round_to(current_ath, 2),
            predicted_next_ath: round_to(predicted_next_ath, 2),
            predicted_date_range: outcome.range,
            confidence: round_to(outcome.confidence, 2),
            factors: outcome.factors,
            disclaimer: ATH_DISCLAIMER.to_string(),
        })
    }
}

impl Default for AthPredictor {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}
