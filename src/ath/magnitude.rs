//! Next-ATH magnitude from past record-to-record growth

use super::AthEvent;
use crate::config::ForecastConfig;
use crate::stats::mean;

#[derive(Debug, Clone, Copy)]
pub struct MagnitudePredictor {
    dampening: f64,
    lookback: usize,
    fallback_multiplier: f64,
}

impl MagnitudePredictor {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            dampening: config.ath_dampening,
            lookback: config.ath_growth_lookback.max(1),
            fallback_multiplier: config.ath_fallback_multiplier,
        }
    }

    /// Consecutive event price ratios
    pub fn growth_ratios(events: &[AthEvent]) -> Vec<f64> {
        events.windows(2).map(|w| w[1].price / w[0].price).collect()
    }

    /// Multiplier applied to the current ATH
    pub fn multiplier(&self, events: &[AthEvent]) -> f64 {
        let ratios = Self::growth_ratios(events);
        let recent = &ratios[ratios.len().saturating_sub(self.lookback)..];
        match mean(recent) {
            Some(growth) => 1.0 + (growth - 1.0) * self.dampening,
            None => self.fallback_multiplier,
        }
    }

    pub fn predict(&self, current_ath: f64, events: &[AthEvent]) -> f64 {
        current_ath * self.multiplier(events)
    }
}

impl Default for MagnitudePredictor {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}
