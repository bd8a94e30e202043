//! Ordered close-price time series

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One observation; only `close` is required
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<f64>,
}

impl PriceSample {
    pub fn close_only(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            timestamp,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }
}

/// Immutable series with strictly ascending, unique timestamps
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    /// Validate ordering and wrap the samples
    pub fn new(samples: Vec<PriceSample>) -> Result<Self> {
        if let Some(pos) = samples
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(ForecastError::InvalidSeries {
                reason: format!(
                    "timestamps not strictly ascending at index {} ({} then {})",
                    pos + 1,
                    samples[pos].timestamp,
                    samples[pos + 1].timestamp
                ),
            });
        }
        if samples.iter().any(|s| !s.close.is_finite()) {
            return Err(ForecastError::InvalidSeries {
                reason: "non-finite close price".to_string(),
            });
        }
        Ok(Self { samples })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Daily closes starting at `start`, one sample per calendar day
    pub fn daily(start: DateTime<Utc>, closes: &[f64]) -> Result<Self> {
        let samples = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceSample::close_only(start + Duration::days(i as i64), close))
            .collect();
        Self::new(samples)
    }

    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    pub fn closes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.close).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.samples.last().map(|s| s.close)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.samples.last().map(|s| s.timestamp)
    }

    /// Highest close in the full (unsampled) series
    pub fn max_close(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.close)
            .fold(None, |acc, c| match acc {
                Some(m) if m >= c => Some(m),
                _ => Some(c),
            })
    }

    /// Samples within `days` of the last timestamp (inclusive)
    ///
    /// A window reaching past the representable date range returns the whole series.
    pub fn tail_days(&self, days: u32) -> PriceSeries {
        let Some(last) = self.last_timestamp() else {
            return PriceSeries::empty();
        };
        let Some(cutoff) = Duration::try_days(days as i64).and_then(|d| last.checked_sub_signed(d)) else {
            return self.clone();
        };
        let start = self.samples.partition_point(|s| s.timestamp < cutoff);
        PriceSeries {
            samples: self.samples[start..].to_vec(),
        }
    }
}
