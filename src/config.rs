//! Tunable constants for the projection and ATH pipelines
//!
//! Defaults reproduce the production calibration. A JSON file can replace any
//! subset of fields, and a handful of environment variables override the result.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::path::Path;

/// Blended CAGR used when no lookback window is covered by the history
pub const DEFAULT_BLENDED_CAGR: f64 = 0.07;

/// Trading days used to annualize daily log-return volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days per projected year
pub const DAYS_PER_YEAR: u32 = 365;

/// Longest history or signal lookback accepted, in days
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

/// Flagship-crypto halving dates used as cycle anchors
pub const HALVING_DATES: [(i32, u32, u32); 4] = [
    (2012, 11, 28),
    (2016, 7, 9),
    (2020, 5, 11),
    (2024, 4, 20),
];

/// One CAGR lookback window and its blend weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CagrWindow {
    pub years: u32,
    pub weight: f64,
}

impl CagrWindow {
    pub fn days(&self) -> usize {
        (self.years * DAYS_PER_YEAR) as usize
    }
}

/// Container for every tunable used by the engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Minimum number of samples before any model runs
    pub min_history_samples: usize,

    /// CAGR lookback windows (5y/10y/20y by default)
    pub cagr_windows: Vec<CagrWindow>,

    /// Fallback blended CAGR
    pub default_cagr: f64,

    /// Annualization factor for volatility
    pub trading_days_per_year: f64,

    /// Approximate upper bound on ATH events; the subsampling stride is `n / target_events`
    pub ath_target_events: usize,

    /// Fraction of the recent ATH-to-ATH growth carried into the next ATH
    pub ath_dampening: f64,

    /// Number of trailing growth ratios averaged
    pub ath_growth_lookback: usize,

    /// Multiplier used when no growth ratios exist
    pub ath_fallback_multiplier: f64,

    /// Cycle anchors for the flagship crypto asset
    pub halving_dates: Vec<NaiveDate>,

    /// Lookback (days) passed to the signal provider
    pub signal_lookback_days: u32,

    /// Days requested for a "full" history fetch
    pub full_history_days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_history_samples: 30,
            cagr_windows: vec![
                CagrWindow { years: 5, weight: 0.2 },
                CagrWindow { years: 10, weight: 0.3 },
                CagrWindow { years: 20, weight: 0.5 },
            ],
            default_cagr: DEFAULT_BLENDED_CAGR,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            ath_target_events: 1000,
            ath_dampening: 0.6,
            ath_growth_lookback: 3,
            ath_fallback_multiplier: 1.5,
            halving_dates: HALVING_DATES
                .iter()
                .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
                .collect(),
            signal_lookback_days: 365,
            full_history_days: 7300,
        }
    }
}

impl ForecastConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: ForecastConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `FORECAST_*` environment overrides
    pub fn apply_env(mut self) -> Result<Self> {
        if let Some(v) = env_var::<usize>("FORECAST_MIN_HISTORY")? {
            self.min_history_samples = v;
        }
        if let Some(v) = env_var::<usize>("FORECAST_TARGET_EVENTS")? {
            self.ath_target_events = v;
        }
        if let Some(v) = env_var::<f64>("FORECAST_DEFAULT_CAGR")? {
            self.default_cagr = v;
        }
        if let Some(v) = env_var::<u32>("FORECAST_SIGNAL_DAYS")? {
            self.signal_lookback_days = v;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_history_samples < 2 {
            return Err(config_err("min_history_samples must be at least 2"));
        }
        if self.ath_target_events == 0 {
            return Err(config_err("ath_target_events must be positive"));
        }
        if !(0.0..=1.0).contains(&self.ath_dampening) {
            return Err(config_err("ath_dampening must be within [0, 1]"));
        }
        if self.ath_growth_lookback == 0 {
            return Err(config_err("ath_growth_lookback must be positive"));
        }
        if self.cagr_windows.iter().any(|w| w.years == 0 || w.weight <= 0.0) {
            return Err(config_err("cagr_windows need positive years and weights"));
        }
        if self.trading_days_per_year <= 0.0 {
            return Err(config_err("trading_days_per_year must be positive"));
        }
        if !self.default_cagr.is_finite() || self.default_cagr <= -1.0 {
            return Err(config_err("default_cagr must be finite and above -1"));
        }
        if !(1..=MAX_LOOKBACK_DAYS).contains(&self.full_history_days) {
            return Err(config_err("full_history_days must be within 1..=36500"));
        }
        if !(1..=MAX_LOOKBACK_DAYS).contains(&self.signal_lookback_days) {
            return Err(config_err("signal_lookback_days must be within 1..=36500"));
        }
        Ok(())
    }
}

fn config_err(reason: &str) -> ForecastError {
    ForecastError::Config { reason: reason.to_string() }
}

fn env_var<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| config_err(&format!("{} has unparseable value {:?}", key, raw))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_calibration() {
        let config = ForecastConfig::default();
        assert_eq!(config.min_history_samples, 30);
        assert_eq!(config.cagr_windows.len(), 3);
        assert_eq!(config.cagr_windows[2].days(), 7300);
        assert_eq!(config.halving_dates.len(), 4);
        assert_eq!(
            config.halving_dates[3],
            NaiveDate::from_ymd_opt(2024, 4, 20).unwrap()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ForecastConfig =
            serde_json::from_str(r#"{"ath_target_events": 250, "default_cagr": 0.05}"#).unwrap();
        assert_eq!(config.ath_target_events, 250);
        assert_eq!(config.default_cagr, 0.05);
        assert_eq!(config.ath_dampening, 0.6);
    }

    #[test]
    fn test_rejects_zero_target_events() {
        let config = ForecastConfig {
            ath_target_events: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ForecastError::Config { .. })));
    }

    #[test]
    fn test_rejects_unbounded_lookbacks() {
        let config: ForecastConfig =
            serde_json::from_str(r#"{"full_history_days": 4000000000}"#).unwrap();
        assert!(matches!(config.validate(), Err(ForecastError::Config { .. })));

        let config = ForecastConfig {
            signal_lookback_days: MAX_LOOKBACK_DAYS + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ForecastConfig {
            full_history_days: MAX_LOOKBACK_DAYS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_total_loss_cagr() {
        for cagr in [-1.0, -1.5, f64::NAN] {
            let config = ForecastConfig {
                default_cagr: cagr,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ForecastError::Config { .. })));
        }
        let config = ForecastConfig {
            default_cagr: -0.5,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
