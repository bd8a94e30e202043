//! Asset Forecast - DCA projections and all-time-high prediction
//!
//! This library provides:
//! - Price-path projection (power-law regression for crypto, weighted CAGR for indices)
//! - Dollar-cost-averaging simulation over low/mid/high price paths
//! - Record-high event extraction and next-ATH magnitude/timing prediction
//! - Collaborator contracts for price history and qualitative signals

pub mod error;
pub mod config;
pub mod stats;
pub mod asset;
pub mod history;
pub mod signals;
pub mod projection;
pub mod ath;
pub mod runner;

// Re-export commonly used types
pub use error::{ForecastError, Result};
pub use config::ForecastConfig;
pub use asset::{Asset, AssetCatalog, AssetClass};
pub use history::{CsvHistoryProvider, HistoryProvider, InMemoryHistory, PriceSample, PriceSeries};
pub use signals::{IndicatorSignalProvider, SignalProvider, SignalSet};
pub use projection::{DcaProjectionResponse, Frequency, ProjectionEngine, ProjectionPoint, ProjectionRequest};
pub use ath::{AthPredictionResponse, AthPredictor};
pub use runner::ForecastRunner;
