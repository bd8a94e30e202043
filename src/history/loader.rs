//! Load price history from CSV files
//!
//! Expected columns: `timestamp` (epoch milliseconds), `close`, and optionally
//! `open`, `high`, `low`, `volume`. Rows with an empty close are dropped.

use super::{HistoryProvider, PriceSample, PriceSeries};
use crate::asset::Asset;
use crate::error::{ForecastError, Result};
use chrono::DateTime;
use csv::Reader;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Default directory holding `<asset_id>.csv` files
pub const DEFAULT_DATA_PATH: &str = "data/history";

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    timestamp: i64,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    close: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
}

impl CsvRow {
    fn to_sample(self) -> Result<Option<PriceSample>> {
        let Some(close) = self.close else {
            return Ok(None);
        };
        let timestamp = DateTime::from_timestamp_millis(self.timestamp).ok_or_else(|| {
            ForecastError::InvalidSeries {
                reason: format!("timestamp {} out of range", self.timestamp),
            }
        })?;
        Ok(Some(PriceSample {
            timestamp,
            close,
            open: self.open,
            high: self.high,
            low: self.low,
            volume: self.volume,
        }))
    }
}

/// Load a series from any reader (e.g., string buffer, network stream)
pub fn load_series_from_reader<R: std::io::Read>(reader: R) -> Result<PriceSeries> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut samples = Vec::new();
    let mut dropped = 0usize;

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        match row.to_sample()? {
            Some(sample) => samples.push(sample),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("dropped {} rows without a close price", dropped);
    }

    PriceSeries::new(samples)
}

/// Load a series from a CSV file
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
    let file = std::fs::File::open(path.as_ref())?;
    load_series_from_reader(file)
}

/// History provider reading `<root>/<asset_id>.csv`
#[derive(Debug, Clone)]
pub struct CsvHistoryProvider {
    root: PathBuf,
}

impl CsvHistoryProvider {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, asset: &Asset) -> PathBuf {
        self.root.join(format!("{}.csv", asset.id))
    }
}

impl Default for CsvHistoryProvider {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl HistoryProvider for CsvHistoryProvider {
    fn fetch(&self, asset: &Asset, days: u32) -> Result<PriceSeries> {
        let path = self.path_for(asset);
        let series = load_series(&path).map_err(|e| {
            warn!("history load failed for {} ({}): {}", asset.id, path.display(), e);
            ForecastError::upstream(&asset.id, e.to_string())
        })?;
        Ok(series.tail_days(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
timestamp,open,high,low,close,volume
1704067200000,100,105,99,104,1000
1704153600000,104,108,103,,1200
1704240000000,,,,107.5,
";

    #[test]
    fn test_load_drops_missing_close() {
        let series = load_series_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![104.0, 107.5]);
        assert_eq!(series.samples()[0].open, Some(100.0));
        assert_eq!(series.samples()[1].volume, None);
    }

    #[test]
    fn test_close_only_columns() {
        let data = "timestamp,close\n1704067200000,1.5\n1704153600000,2.5\n";
        let series = load_series_from_reader(data.as_bytes()).unwrap();
        assert_eq!(series.last_close(), Some(2.5));
    }

    #[test]
    fn test_unordered_rows_rejected() {
        let data = "timestamp,close\n1704153600000,1.5\n1704067200000,2.5\n";
        assert!(matches!(
            load_series_from_reader(data.as_bytes()),
            Err(ForecastError::InvalidSeries { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_upstream_failure() {
        let provider = CsvHistoryProvider::new("/nonexistent/history");
        let catalog = crate::asset::AssetCatalog::standard();
        let err = provider.fetch(catalog.get("sp500").unwrap(), 365).unwrap_err();
        assert!(matches!(err, ForecastError::UpstreamUnavailable { .. }));
    }
}
