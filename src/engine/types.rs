//! Prediction result types

use crate::business::{CostBreakdown, FinancialsError, ProfitAllocation};
use crate::event::ValidationError;
use crate::weather::WeatherImpact;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Prediction failures
///
/// Missing weather or history never fail a prediction; they surface as
/// [`DegradedInput`] warnings instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
    /// Valid input whose money amounts do not fit in a `Decimal`
    #[error(transparent)]
    Financials(#[from] FinancialsError),
}

/// Input that was missing or thin; the prediction still completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedInput {
    /// No weather observation, weather factor neutral
    MissingWeather,
    /// No complete historical records, dataset average replaced by base rate
    NoHistoricalData,
    /// Too few past events at this location, location factor neutral
    InsufficientLocationHistory,
    /// Forecast heat puts product quality at risk
    QualityRisk,
}

impl fmt::Display for DegradedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            DegradedInput::MissingWeather => "no weather data, weather treated as neutral",
            DegradedInput::NoHistoricalData => "no historical data, using the base conversion rate",
            DegradedInput::InsufficientLocationHistory => {
                "not enough past events at this location, location treated as neutral"
            }
            DegradedInput::QualityRisk => "high temperature, product quality at risk",
        };
        f.write_str(message)
    }
}

/// Every multiplier that went into the quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTrace {
    /// Conversion rate per attendee
    pub base_rate: f64,
    /// attendees * base_rate
    pub base_units: f64,
    pub duration: f64,
    pub weather: f64,
    pub historical: f64,
    pub location: f64,
    pub category: f64,
    pub day_of_week: f64,
    pub time_of_day: f64,
    /// Product of weather through time_of_day
    pub combined: f64,
    /// Rounded quantity before the minimum order floor
    pub raw_units: u64,
    /// Whether the minimum order floor lifted the quantity
    pub floored: bool,
}

/// Sales prediction with financials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_units: u64,
    pub revenue: Decimal,
    pub cost_breakdown: CostBreakdown,
    pub total_costs: Decimal,
    pub profit: Decimal,
    /// Percent of revenue
    pub profit_margin: Decimal,
    pub break_even_units: Option<u64>,
    /// 20-95
    pub confidence: u8,
    pub factor_trace: FactorTrace,
    pub profit_allocation: ProfitAllocation,
    /// Revenue per expected attendee
    pub avg_sale_per_visitor: Decimal,
    pub profit_per_unit: Decimal,
    /// Similar past events with known attendance and sales
    pub similar_events: usize,
    pub weather_impact: WeatherImpact,
    pub warnings: Vec<DegradedInput>,
}
