//! Error types shared by the projection and ATH pipelines

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Top-level error type for asset_forecast
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// Too little history, or too few usable points for a regression/volatility fit
    #[error("insufficient data for {asset_id}: {reason}")]
    InsufficientData { asset_id: String, reason: String },

    /// A history collaborator could not deliver data
    #[error("upstream unavailable for {asset_id}: {reason}")]
    UpstreamUnavailable { asset_id: String, reason: String },

    /// Qualitative signals could not be derived (always swallowed by the ATH pipeline)
    #[error("signals unavailable for {asset_id}: {reason}")]
    SignalUnavailable { asset_id: String, reason: String },

    #[error("unknown asset: {asset_id}")]
    AssetNotFound { asset_id: String },

    #[error("invalid request field {field}: {reason}")]
    InvalidRequest { field: String, reason: String },

    #[error("invalid price series: {reason}")]
    InvalidSeries { reason: String },

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ForecastError {
    pub fn insufficient(asset_id: &str, reason: impl Into<String>) -> Self {
        ForecastError::InsufficientData {
            asset_id: asset_id.to_string(),
            reason: reason.into(),
        }
    }

    pub fn upstream(asset_id: &str, reason: impl Into<String>) -> Self {
        ForecastError::UpstreamUnavailable {
            asset_id: asset_id.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_request(field: &str, reason: impl Into<String>) -> Self {
        ForecastError::InvalidRequest {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the two kinds callers treat as "not enough history"
    pub fn is_data_shortage(&self) -> bool {
        matches!(
            self,
            ForecastError::InsufficientData { .. } | ForecastError::UpstreamUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_asset() {
        let err = ForecastError::insufficient("sp500", "need 30 samples, have 4");
        assert_eq!(err.to_string(), "insufficient data for sp500: need 30 samples, have 4");
    }

    #[test]
    fn test_data_shortage_kinds() {
        assert!(ForecastError::insufficient("a", "x").is_data_shortage());
        assert!(ForecastError::upstream("a", "x").is_data_shortage());
        assert!(!ForecastError::AssetNotFound { asset_id: "a".into() }.is_data_shortage());
    }
}
