//! Multiplicative sales predictor
//!
//! quantity = attendees * base_rate * duration
//!          * weather * historical * location * category * day_of_week * time_of_day
//!
//! rounded and lifted to the minimum order quantity.

use super::confidence::{ConfidenceScorer, Evidence};
use super::{DegradedInput, FactorTrace, Forecaster, PredictionError, PredictionResult};
use crate::business::BusinessModelCalculator;
use crate::config::Config;
use crate::event::EventInput;
use crate::factors::FactorModel;
use crate::history::HistoricalStore;
use crate::weather::{WeatherAdjuster, WeatherImpact, WeatherObservation};
use rust_decimal::Decimal;

/// Stateless prediction engine
///
/// Holds only configuration; each call reads the inputs it is given, so the
/// same inputs always produce the same result.
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    config: Config,
    factors: FactorModel,
    weather: WeatherAdjuster,
    business: BusinessModelCalculator,
    confidence: ConfidenceScorer,
}

impl PredictionEngine {
    /// Create a new engine
    pub fn new(config: Config) -> Self {
        Self {
            factors: FactorModel::new(config.model.clone()),
            weather: WeatherAdjuster::new(config.weather.clone()),
            business: BusinessModelCalculator::new(config.business.clone()),
            confidence: ConfidenceScorer::new(config.confidence.clone()),
            config,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Business calculator used for financials
    pub fn business(&self) -> &BusinessModelCalculator {
        &self.business
    }

    /// Predict sales and financials for one event
    pub fn predict(
        &self,
        input: &EventInput,
        history: &HistoricalStore,
        weather: Option<&WeatherObservation>,
    ) -> Result<PredictionResult, PredictionError> {
        input.validate()?;

        let model = &self.config.model;
        let base_rate = model.base_conversion_rate;
        let base_units = input.expected_attendees as f64 * base_rate;

        let duration = self.factors.duration_factor(input.duration_days);
        let weather_factor = self.weather.factor(weather, input.environment);
        let historical = history.weighted_historical_factor(input);
        let location = history.location_factor(input);
        let category = self.factors.category_factor(input.category);
        let day_of_week = self
            .factors
            .event_days_factor(input.start_date, input.duration_days);
        let time_of_day = self.factors.time_of_day_factor(input.time);

        let combined = weather_factor * historical * location * category * day_of_week * time_of_day;
        let raw = (base_units * duration * combined).round();
        // `as` saturates; negative or NaN quantities become zero
        let raw_units = if raw.is_finite() { raw as u64 } else { 0 };
        let predicted_units = raw_units.max(model.minimum_order_quantity);

        let factor_trace = FactorTrace {
            base_rate,
            base_units,
            duration,
            weather: weather_factor,
            historical,
            location,
            category,
            day_of_week,
            time_of_day,
            combined,
            raw_units,
            floored: predicted_units > raw_units,
        };
        tracing::debug!(?factor_trace, predicted_units, "Quantity predicted");

        let warnings = self.degraded_inputs(input, history, weather);
        for warning in &warnings {
            tracing::warn!(%warning, "Degraded prediction input");
        }

        let similar_events = history.similar_with_sales(input);
        let stats = history.stats();
        let confidence = self.confidence.score(&Evidence {
            similar_events,
            completion_rate: (stats.total_records > 0).then_some(stats.completion_rate),
            has_weather: weather.is_some(),
            expected_attendees: input.expected_attendees,
        });

        let financials = self.business.calculate(predicted_units, input)?;

        let avg_sale_per_visitor =
            (financials.revenue / Decimal::from(input.expected_attendees)).round_dp(2);
        let profit_per_unit = if predicted_units > 0 {
            (financials.profit / Decimal::from(predicted_units)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        Ok(PredictionResult {
            predicted_units,
            revenue: financials.revenue,
            cost_breakdown: financials.cost_breakdown,
            total_costs: financials.total_costs,
            profit: financials.profit,
            profit_margin: financials.profit_margin,
            break_even_units: financials.break_even_units,
            confidence,
            factor_trace,
            profit_allocation: financials.allocation,
            avg_sale_per_visitor,
            profit_per_unit,
            similar_events,
            weather_impact: WeatherImpact::classify(weather_factor),
            warnings,
        })
    }

    fn degraded_inputs(
        &self,
        input: &EventInput,
        history: &HistoricalStore,
        weather: Option<&WeatherObservation>,
    ) -> Vec<DegradedInput> {
        let mut warnings = Vec::new();

        if weather.is_none() {
            warnings.push(DegradedInput::MissingWeather);
        }

        if history.events().iter().all(|e| !e.is_complete()) {
            warnings.push(DegradedInput::NoHistoricalData);
        } else if history.location_matches(input) < self.config.model.min_location_events {
            warnings.push(DegradedInput::InsufficientLocationHistory);
        }

        if self.weather.quality_risk(weather, input.environment) {
            warnings.push(DegradedInput::QualityRisk);
        }

        warnings
    }
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Forecaster for PredictionEngine {
    fn predict(
        &self,
        input: &EventInput,
        history: &HistoricalStore,
        weather: Option<&WeatherObservation>,
    ) -> Result<PredictionResult, PredictionError> {
        PredictionEngine::predict(self, input, history, weather)
    }
}
