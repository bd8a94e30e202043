//! Model selection by asset class

use super::cagr::CagrBlendModel;
use super::model::PriceModel;
use super::power_law::PowerLawModel;
use crate::asset::AssetClass;
use crate::config::ForecastConfig;

/// Picks the price model for an asset class
///
/// Implement this trait to route new asset classes or models without touching callers.
pub trait ModelSelector: Send + Sync {
    fn select(&self, class: AssetClass) -> &dyn PriceModel;
}

/// Crypto classes use the power-law model, everything else the CAGR blend
#[derive(Debug, Clone)]
pub struct AssetClassSelector {
    power_law: PowerLawModel,
    cagr: CagrBlendModel,
}

impl AssetClassSelector {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            power_law: PowerLawModel::new(),
            cagr: CagrBlendModel::new(config),
        }
    }
}

impl Default for AssetClassSelector {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}

impl ModelSelector for AssetClassSelector {
    fn select(&self, class: AssetClass) -> &dyn PriceModel {
        if class.is_crypto() {
            &self.power_law
        } else {
            &self.cagr
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ModelType;

    #[test]
    fn test_selection_by_class() {
        let selector = AssetClassSelector::default();
        assert_eq!(
            selector.select(AssetClass::FlagshipCrypto).model_type(),
            ModelType::PowerLawRegression
        );
        assert_eq!(selector.select(AssetClass::Crypto).model_type(), ModelType::PowerLawRegression);
        assert_eq!(selector.select(AssetClass::Traditional).model_type(), ModelType::WeightedCagr);
    }
}
