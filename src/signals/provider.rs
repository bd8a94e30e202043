//! Signal collaborator contract and the indicator-backed implementation

use super::indicators::{macd_histogram, rsi, sma};
use super::{Signal, SignalKind, SignalSet};
use crate::asset::Asset;
use crate::error::{ForecastError, Result};
use crate::history::HistoryProvider;
use log::{debug, warn};

/// Minimum samples before indicators are computed
const MIN_SIGNAL_SAMPLES: usize = 30;

/// Supplier of qualitative signals for an asset
pub trait SignalProvider: Send + Sync {
    fn compute(&self, asset: &Asset, days: u32) -> Result<SignalSet>;
}

/// Ask for signals, logging and discarding any failure
pub fn fetch_signals_best_effort<S: SignalProvider + ?Sized>(
    provider: &S,
    asset: &Asset,
    days: u32,
) -> Option<SignalSet> {
    match provider.compute(asset, days) {
        Ok(signals) => Some(signals),
        Err(e) => {
            warn!("continuing without signals for {}: {}", asset.id, e);
            None
        }
    }
}

/// Derives signals from SMA20/50, RSI14, and MACD(12,26,9) over recent history
#[derive(Debug, Clone)]
pub struct IndicatorSignalProvider<H> {
    history: H,
}

impl<H: HistoryProvider> IndicatorSignalProvider<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }

    /// Signals from the final bar of `closes`
    pub fn signals_from_closes(closes: &[f64]) -> SignalSet {
        let mut signals = SignalSet::new();
        let Some(&price) = closes.last() else {
            return signals;
        };
        let last = |series: Vec<Option<f64>>| series.last().copied().flatten();

        let sma_20 = last(sma(closes, 20));
        let sma_50 = last(sma(closes, 50));

        if let (Some(fast), Some(slow)) = (sma_20, sma_50) {
            let signal = if fast > slow { Signal::Bullish } else { Signal::Bearish };
            signals.insert(SignalKind::SmaCrossover, signal);
        }

        if let Some(value) = last(rsi(closes, 14)) {
            let signal = if value > 70.0 {
                Signal::Overbought
            } else if value < 30.0 {
                Signal::Oversold
            } else {
                Signal::Neutral
            };
            signals.insert(SignalKind::Rsi, signal);
        }

        if let Some(hist) = last(macd_histogram(closes, 12, 26, 9)) {
            let signal = if hist > 0.0 { Signal::Bullish } else { Signal::Bearish };
            signals.insert(SignalKind::Macd, signal);
        }

        if let Some(slow) = sma_50 {
            let signal = if price > slow { Signal::AboveSma50 } else { Signal::BelowSma50 };
            signals.insert(SignalKind::Trend, signal);
        }

        signals
    }
}

impl<H: HistoryProvider> SignalProvider for IndicatorSignalProvider<H> {
    fn compute(&self, asset: &Asset, days: u32) -> Result<SignalSet> {
        let series = self.history.fetch(asset, days).map_err(|e| ForecastError::SignalUnavailable {
            asset_id: asset.id.clone(),
            reason: e.to_string(),
        })?;

        if series.len() < MIN_SIGNAL_SAMPLES {
            return Err(ForecastError::SignalUnavailable {
                asset_id: asset.id.clone(),
                reason: format!("need {} samples, have {}", MIN_SIGNAL_SAMPLES, series.len()),
            });
        }

        let signals = Self::signals_from_closes(&series.closes());
        debug!("{} signals for {}", signals.len(), asset.id);
        Ok(signals)
    }
}

/// Fixed signal answer, or a fixed failure
#[derive(Debug, Clone, Default)]
pub struct StaticSignals {
    signals: Option<SignalSet>,
}

impl StaticSignals {
    pub fn new(signals: SignalSet) -> Self {
        Self { signals: Some(signals) }
    }

    /// A provider that always fails
    pub fn unavailable() -> Self {
        Self { signals: None }
    }
}

impl SignalProvider for StaticSignals {
    fn compute(&self, asset: &Asset, _days: u32) -> Result<SignalSet> {
        self.signals.clone().ok_or_else(|| ForecastError::SignalUnavailable {
            asset_id: asset.id.clone(),
            reason: "no signal source configured".to_string(),
        })
    }
}
