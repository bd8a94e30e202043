//! Price history: series type, provider contract, and bundled providers

mod series;
mod provider;
pub mod loader;

pub use series::{PriceSample, PriceSeries};
pub use provider::{HistoryProvider, InMemoryHistory};
pub use loader::{load_series, load_series_from_reader, CsvHistoryProvider};
