//! Prediction engine module
//!
//! Combines demand factors, historical evidence and weather into a
//! recommended quantity, then prices it under the chosen business model

mod confidence;
mod predictor;
mod types;

pub use confidence::{ConfidenceScorer, Evidence, CONFIDENCE_MAX, CONFIDENCE_MIN};
pub use predictor::PredictionEngine;
pub use types::{DegradedInput, FactorTrace, PredictionError, PredictionResult};

use crate::event::EventInput;
use crate::history::HistoricalStore;
use crate::weather::WeatherObservation;

/// Trait for sales forecasting implementations
pub trait Forecaster: Send + Sync {
    /// Predict sales and financials for one event
    fn predict(
        &self,
        input: &EventInput,
        history: &HistoricalStore,
        weather: Option<&WeatherObservation>,
    ) -> Result<PredictionResult, PredictionError>;
}
