//! Qualitative trading signals consumed by the ATH confidence adjuster

mod types;
mod provider;
pub mod indicators;

pub use types::{Signal, SignalKind, SignalSet};
pub use provider::{fetch_signals_best_effort, IndicatorSignalProvider, SignalProvider, StaticSignals};
