//! Signal vocabulary

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of a signal; ordering fixes the order factors are reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    SmaCrossover,
    Rsi,
    Macd,
    Trend,
}

/// Qualitative signal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Bullish,
    Bearish,
    Overbought,
    Oversold,
    Neutral,
    #[serde(rename = "above_sma50")]
    AboveSma50,
    #[serde(rename = "below_sma50")]
    BelowSma50,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Bullish => "bullish",
            Signal::Bearish => "bearish",
            Signal::Overbought => "overbought",
            Signal::Oversold => "oversold",
            Signal::Neutral => "neutral",
            Signal::AboveSma50 => "above_sma50",
            Signal::BelowSma50 => "below_sma50",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signals keyed by kind
pub type SignalSet = BTreeMap<SignalKind, Signal>;
