//! Asset definitions and the fixed catalog

mod data;
mod catalog;

pub use data::{Asset, AssetClass};
pub use catalog::AssetCatalog;
