//! All-time-high prediction: event extraction, magnitude, timing, confidence

mod events;
mod magnitude;
mod timing;
mod confidence;
mod predictor;

pub use events::{AthEvent, EventDetector};
pub use magnitude::MagnitudePredictor;
pub use timing::{DateRange, TimingInput, TimingOutcome, TimingStrategy};
pub use confidence::ConfidenceAdjuster;
pub use predictor::{AthPredictionResponse, AthPredictor, ATH_DISCLAIMER};
