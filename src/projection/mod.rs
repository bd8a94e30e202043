//! Price-path models, model selection, and the DCA simulator

mod model;
mod power_law;
mod cagr;
mod selector;
mod dca;
mod request;
mod engine;

pub use model::{ModelType, PriceBand, PriceModel, PricePathProjection};
pub use power_law::{PowerLawFit, PowerLawModel};
pub use cagr::{CagrBlend, CagrBlendModel};
pub use selector::{AssetClassSelector, ModelSelector};
pub use dca::{DcaSimulator, Frequency, ProjectionPoint};
pub use request::{DcaProjectionResponse, ProjectionRequest, DCA_DISCLAIMER};
pub use engine::ProjectionEngine;
