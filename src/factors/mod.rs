//! Demand factor module
//!
//! Independent multiplicative adjustments derived from the event itself:
//! category, calendar (day of week, time of day) and duration. Every factor
//! is clamped to a fixed range so outlier inputs or config overrides cannot
//! run away.

mod calendar;

use crate::config::ModelConfig;
use crate::event::EventCategory;
use chrono::{NaiveDate, NaiveTime};

/// Range for the category factor
pub const CATEGORY_FACTOR_BOUNDS: (f64, f64) = (0.2, 2.0);
/// Range for day-of-week and time-of-day factors
pub const CALENDAR_FACTOR_BOUNDS: (f64, f64) = (0.5, 1.5);
/// Range for the duration factor
pub const DURATION_FACTOR_BOUNDS: (f64, f64) = (0.1, 10.0);

/// Clamp a factor, mapping non-finite values to neutral
pub fn bounded(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        1.0_f64.clamp(min, max)
    }
}

/// Stateless factor lookups over event attributes
#[derive(Debug, Clone)]
pub struct FactorModel {
    config: ModelConfig,
}

impl FactorModel {
    /// Create a new factor model
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Relative demand of a category compared to a food festival
    pub fn category_factor(&self, category: EventCategory) -> f64 {
        let (min, max) = CATEGORY_FACTOR_BOUNDS;
        bounded(self.config.category_factors.get(category), min, max)
    }

    /// Multiplier for the number of event days
    ///
    /// Uses the configured table, then extends linearly up to the cap.
    pub fn duration_factor(&self, days: u32) -> f64 {
        let days = days.max(1) as usize;
        let table = &self.config.duration_factors;

        let factor = match table.get(days - 1) {
            Some(f) => *f,
            None => {
                let extended = 1.0 + (days - 1) as f64 * self.config.duration_extension_step;
                extended.min(self.config.max_duration_factor)
            }
        };

        let (min, max) = DURATION_FACTOR_BOUNDS;
        bounded(factor, min, max)
    }

    /// Multiplier for a single calendar day
    pub fn day_of_week_factor(&self, date: NaiveDate) -> f64 {
        calendar::day_factor(&self.config.calendar, date)
    }

    /// Mean day-of-week multiplier across every day the event runs
    pub fn event_days_factor(&self, start: NaiveDate, days: u32) -> f64 {
        calendar::span_factor(&self.config.calendar, start, days)
    }

    /// Multiplier for the opening time
    pub fn time_of_day_factor(&self, time: Option<NaiveTime>) -> f64 {
        calendar::time_factor(&self.config.calendar, time)
    }
}

impl Default for FactorModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_table() {
        let model = FactorModel::default();
        assert_eq!(model.duration_factor(1), 1.0);
        assert_eq!(model.duration_factor(2), 1.75);
        assert_eq!(model.duration_factor(3), 2.35);
        assert_eq!(model.duration_factor(4), 2.8);
        assert_eq!(model.duration_factor(5), 3.1);
    }

    #[test]
    fn test_duration_extrapolation() {
        let model = FactorModel::default();
        assert!((model.duration_factor(6) - 3.75).abs() < 1e-9);
        assert_eq!(model.duration_factor(7), 4.0);
        assert_eq!(model.duration_factor(30), 4.0);
    }

    #[test]
    fn test_zero_duration_treated_as_one_day() {
        let model = FactorModel::default();
        assert_eq!(model.duration_factor(0), 1.0);
    }

    #[test]
    fn test_category_table() {
        let model = FactorModel::default();
        assert_eq!(model.category_factor(EventCategory::FoodFestival), 1.0);
        assert_eq!(model.category_factor(EventCategory::ChocolateFestival), 1.27);
        assert_eq!(model.category_factor(EventCategory::Other), 0.55);
    }

    #[test]
    fn test_category_override_is_clamped() {
        let mut config = ModelConfig::default();
        config.category_factors.concert = 9.0;
        config.category_factors.sporting = 0.01;
        let model = FactorModel::new(config);
        assert_eq!(model.category_factor(EventCategory::Concert), 2.0);
        assert_eq!(model.category_factor(EventCategory::Sporting), 0.2);
    }

    #[test]
    fn test_day_of_week_factor() {
        let model = FactorModel::default();
        let date = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
        // Thursday, Friday, Saturday, Sunday
        assert_eq!(model.day_of_week_factor(date(12)), 0.9);
        assert_eq!(model.day_of_week_factor(date(13)), 1.1);
        assert_eq!(model.day_of_week_factor(date(14)), 1.3);
        assert_eq!(model.day_of_week_factor(date(15)), 1.3);
    }

    #[test]
    fn test_day_of_week_override_is_clamped() {
        let mut config = ModelConfig::default();
        config.calendar.weekend = 4.0;
        config.calendar.weekday = 0.0;
        let model = FactorModel::new(config);
        assert_eq!(model.day_of_week_factor(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()), 1.5);
        assert_eq!(model.day_of_week_factor(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()), 0.5);
    }

    #[test]
    fn test_bounded_handles_nan() {
        assert_eq!(bounded(f64::NAN, 0.2, 1.3), 1.0);
        assert_eq!(bounded(f64::INFINITY, 0.3, 3.0), 1.0);
        assert_eq!(bounded(f64::NAN, 1.5, 2.0), 1.5);
        assert_eq!(bounded(0.1, 0.2, 1.3), 0.2);
    }
}
