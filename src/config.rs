//! Configuration types for stand-forecast
//!
//! Every constant the model uses lives here and can be overridden from a
//! TOML file; a missing section or field falls back to the default table.

use crate::event::EventCategory;
use crate::telemetry::LogFormat;
use crate::weather::WeatherCondition;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub business: BusinessConfig,
    #[serde(default)]
    pub confidence: ConfidenceConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value outside its allowed range
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Demand model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Units sold per attendee when nothing else is known
    pub base_conversion_rate: f64,
    /// Smallest quantity ever recommended
    pub minimum_order_quantity: u64,
    pub category_factors: CategoryFactors,
    /// Duration factor for 1, 2, 3... days
    pub duration_factors: Vec<f64>,
    /// Per-day increment past the end of the duration table
    pub duration_extension_step: f64,
    pub max_duration_factor: f64,
    pub calendar: CalendarFactors,
    pub historical_factor_min: f64,
    pub historical_factor_max: f64,
    pub location_factor_min: f64,
    pub location_factor_max: f64,
    /// Matching past events needed before location popularity counts
    pub min_location_events: usize,
    /// Similarity points an event needs to count as similar (max 6)
    pub similarity_threshold: u8,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_conversion_rate: 0.25,
            minimum_order_quantity: 50,
            category_factors: CategoryFactors::default(),
            duration_factors: vec![1.0, 1.75, 2.35, 2.8, 3.1],
            duration_extension_step: 0.55,
            max_duration_factor: 4.0,
            calendar: CalendarFactors::default(),
            historical_factor_min: 0.3,
            historical_factor_max: 3.0,
            location_factor_min: 0.5,
            location_factor_max: 2.0,
            min_location_events: 2,
            similarity_threshold: 2,
        }
    }
}

/// Demand multiplier per event category
///
/// Derived from per-category conversion rates normalized to the food
/// festival rate (0.22 units per attendee).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryFactors {
    pub food_festival: f64,
    pub chocolate_festival: f64,
    pub family_festival: f64,
    pub cultural: f64,
    pub sporting: f64,
    pub trade_fair: f64,
    pub concert: f64,
    pub other: f64,
}

impl Default for CategoryFactors {
    fn default() -> Self {
        Self {
            food_festival: 1.0,       // 0.22
            chocolate_festival: 1.27, // 0.28
            family_festival: 0.82,    // 0.18
            cultural: 0.68,           // 0.15
            sporting: 0.45,           // 0.10
            trade_fair: 0.36,         // 0.08
            concert: 0.27,            // 0.06
            other: 0.55,              // 0.12
        }
    }
}

impl CategoryFactors {
    /// Factor for a category
    pub fn get(&self, category: EventCategory) -> f64 {
        match category {
            EventCategory::FoodFestival => self.food_festival,
            EventCategory::ChocolateFestival => self.chocolate_festival,
            EventCategory::FamilyFestival => self.family_festival,
            EventCategory::Cultural => self.cultural,
            EventCategory::Sporting => self.sporting,
            EventCategory::TradeFair => self.trade_fair,
            EventCategory::Concert => self.concert,
            EventCategory::Other => self.other,
        }
    }
}

/// Day-of-week and time-of-day multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarFactors {
    pub weekend: f64,
    pub friday: f64,
    pub weekday: f64,
    /// 10:00-14:59
    pub midday: f64,
    /// 15:00-18:59
    pub afternoon: f64,
    /// 19:00-21:59
    pub evening: f64,
    /// Any other opening hour
    pub off_hours: f64,
    /// No opening time given
    pub unscheduled: f64,
}

impl Default for CalendarFactors {
    fn default() -> Self {
        Self {
            weekend: 1.3,
            friday: 1.1,
            weekday: 0.9,
            midday: 1.2,
            afternoon: 1.1,
            evening: 0.9,
            off_hours: 1.0,
            unscheduled: 1.0,
        }
    }
}

/// Weather adjustment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Lower edge of the comfortable temperature band (°C)
    pub comfort_min_c: f64,
    /// Upper edge of the comfortable temperature band (°C)
    pub comfort_max_c: f64,
    /// Below this fewer visitors come out (°C)
    pub cold_threshold_c: f64,
    pub comfort_factor: f64,
    /// Between the cold threshold and the comfort band
    pub mild_factor: f64,
    /// Above the comfort band (melting and spoilage)
    pub hot_factor: f64,
    pub cold_factor: f64,
    pub conditions: ConditionFactors,
    /// Wind speed above which demand drops (m/s)
    pub wind_threshold_ms: f64,
    pub wind_factor: f64,
    /// Share of the outdoor deviation felt indoors
    pub indoor_sensitivity: f64,
    pub indoor_min: f64,
    pub indoor_max: f64,
    /// Outdoor temperature at which glazing starts to melt (°C)
    pub quality_risk_temp_c: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            comfort_min_c: 20.0,
            comfort_max_c: 25.0,
            cold_threshold_c: 15.0,
            comfort_factor: 1.0,
            mild_factor: 1.0,
            hot_factor: 0.8,
            cold_factor: 0.7,
            conditions: ConditionFactors::default(),
            wind_threshold_ms: 10.0,
            wind_factor: 0.9,
            indoor_sensitivity: 0.25,
            indoor_min: 0.9,
            indoor_max: 1.1,
            quality_risk_temp_c: 28.0,
        }
    }
}

/// Multiplier per weather condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionFactors {
    pub clear: f64,
    pub clouds: f64,
    pub rain: f64,
    pub drizzle: f64,
    pub snow: f64,
    pub thunderstorm: f64,
    pub mist: f64,
}

impl Default for ConditionFactors {
    fn default() -> Self {
        Self {
            clear: 1.1,
            clouds: 0.9,
            rain: 0.5,
            drizzle: 0.5,
            snow: 0.4,
            thunderstorm: 0.3,
            mist: 1.0,
        }
    }
}

impl ConditionFactors {
    /// Factor for a condition
    pub fn get(&self, condition: WeatherCondition) -> f64 {
        match condition {
            WeatherCondition::Clear => self.clear,
            WeatherCondition::Clouds => self.clouds,
            WeatherCondition::Rain => self.rain,
            WeatherCondition::Drizzle => self.drizzle,
            WeatherCondition::Snow => self.snow,
            WeatherCondition::Thunderstorm => self.thunderstorm,
            WeatherCondition::Mist => self.mist,
        }
    }
}

/// Labor and pricing constants for the operating models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// Wage per worker hour
    pub hourly_wage: Decimal,
    pub hours_per_event_day: Decimal,
    /// Helpers hired when the owner runs the stand
    pub owner_helpers: u32,
    /// Helpers hired next to the employee
    pub employee_helpers: u32,
    /// Employee's share of revenue in percent
    pub employee_revenue_share_pct: Decimal,
    /// Price a franchisee pays the operator per unit
    pub franchise_unit_price: Decimal,
    /// Transport cost per driven kilometre
    pub transport_cost_per_km: Decimal,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            hourly_wage: dec!(150),
            hours_per_event_day: dec!(10),
            owner_helpers: 2,
            employee_helpers: 1,
            employee_revenue_share_pct: dec!(5),
            franchise_unit_price: dec!(52),
            transport_cost_per_km: dec!(15),
        }
    }
}

/// Confidence score heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub base: i32,
    /// Points per similar past event
    pub per_similar_event: i32,
    pub max_similar_bonus: i32,
    /// Points at 100 % complete historical records
    pub max_completeness_bonus: i32,
    /// Points when a weather observation is available
    pub weather_bonus: i32,
    pub large_event_attendees: u64,
    pub large_event_penalty: i32,
    pub small_event_attendees: u64,
    pub small_event_penalty: i32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 45,
            per_similar_event: 8,
            max_similar_bonus: 30,
            max_completeness_bonus: 20,
            weather_bonus: 5,
            large_event_attendees: 5000,
            large_event_penalty: 10,
            small_event_attendees: 50,
            small_event_penalty: 15,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the model cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()?;
        self.weather.validate()?;
        self.business.validate()
    }
}

impl ModelConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_conversion_rate > 0.0 && self.base_conversion_rate <= 1.0) {
            return Err(invalid(
                "model.base_conversion_rate",
                format!("must be in (0, 1], got {}", self.base_conversion_rate),
            ));
        }
        if self.duration_factors.is_empty() {
            return Err(invalid("model.duration_factors", "table is empty"));
        }
        if self.duration_factors.iter().any(|f| *f <= 0.0) {
            return Err(invalid("model.duration_factors", "factors must be positive"));
        }
        if EventCategory::ALL
            .iter()
            .any(|c| self.category_factors.get(*c) <= 0.0)
        {
            return Err(invalid("model.category_factors", "factors must be positive"));
        }
        if self.historical_factor_min > self.historical_factor_max {
            return Err(invalid(
                "model.historical_factor_min",
                "must not exceed historical_factor_max",
            ));
        }
        if self.location_factor_min > self.location_factor_max {
            return Err(invalid(
                "model.location_factor_min",
                "must not exceed location_factor_max",
            ));
        }
        if self.similarity_threshold > 6 {
            return Err(invalid(
                "model.similarity_threshold",
                format!("at most 6 points exist, got {}", self.similarity_threshold),
            ));
        }
        Ok(())
    }
}

impl WeatherConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.comfort_min_c > self.comfort_max_c {
            return Err(invalid(
                "weather.comfort_min_c",
                "comfort band is inverted",
            ));
        }
        if self.cold_threshold_c > self.comfort_min_c {
            return Err(invalid(
                "weather.cold_threshold_c",
                "must not exceed comfort_min_c",
            ));
        }
        if self.indoor_min > self.indoor_max {
            return Err(invalid("weather.indoor_min", "must not exceed indoor_max"));
        }
        Ok(())
    }
}

impl BusinessConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.hourly_wage < Decimal::ZERO {
            return Err(invalid(
                "business.hourly_wage",
                format!("cannot be negative, got {}", self.hourly_wage),
            ));
        }
        if self.hours_per_event_day < Decimal::ZERO {
            return Err(invalid(
                "business.hours_per_event_day",
                format!("cannot be negative, got {}", self.hours_per_event_day),
            ));
        }
        if self.employee_revenue_share_pct < Decimal::ZERO
            || self.employee_revenue_share_pct > dec!(100)
        {
            return Err(invalid(
                "business.employee_revenue_share_pct",
                format!("must be in [0, 100], got {}", self.employee_revenue_share_pct),
            ));
        }
        if self.franchise_unit_price <= Decimal::ZERO {
            return Err(invalid(
                "business.franchise_unit_price",
                format!("must be positive, got {}", self.franchise_unit_price),
            ));
        }
        if self.transport_cost_per_km < Decimal::ZERO {
            return Err(invalid(
                "business.transport_cost_per_km",
                format!("cannot be negative, got {}", self.transport_cost_per_km),
            ));
        }
        Ok(())
    }
}
