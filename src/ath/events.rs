//! Record-high event extraction

use crate::history::PriceSeries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A new record close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AthEvent {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

/// Walks a subsampled series and emits each new running maximum
///
/// The stride is `max(1, n / target_events)`, which bounds the event count for
/// very long histories.
#[derive(Debug, Clone, Copy)]
pub struct EventDetector {
    target_events: usize,
}

impl EventDetector {
    pub fn new(target_events: usize) -> Self {
        Self {
            target_events: target_events.max(1),
        }
    }

    pub fn stride(&self, samples: usize) -> usize {
        (samples / self.target_events).max(1)
    }

    /// Events in chronological order, strictly increasing in price
    pub fn detect(&self, series: &PriceSeries) -> Vec<AthEvent> {
        let stride = self.stride(series.len());
        let mut running_max = 0.0;
        let mut events = Vec::new();

        for sample in series.samples().iter().step_by(stride) {
            if sample.close > running_max {
                running_max = sample.close;
                events.push(AthEvent {
                    price: sample.close,
                    timestamp: sample.timestamp,
                });
            }
        }

        events
    }
}

impl Default for EventDetector {
    fn default() -> Self {
        Self::new(1000)
    }
}
