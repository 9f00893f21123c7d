//! Weather module
//!
//! Turns a weather observation into a demand factor

mod adjuster;

pub use adjuster::{WeatherAdjuster, WEATHER_FACTOR_MAX, WEATHER_FACTOR_MIN};

use serde::{Deserialize, Deserializer, Serialize};

/// Weather condition group
///
/// Deserializes from any group name [`WeatherCondition::from_group`] knows,
/// in any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    Mist,
}

impl WeatherCondition {
    /// Map a forecast provider's condition group name ("Clear", "Clouds", "Fog", ...)
    pub fn from_group(group: &str) -> Option<Self> {
        let condition = match group.trim().to_ascii_lowercase().as_str() {
            "clear" => WeatherCondition::Clear,
            "clouds" | "cloudy" => WeatherCondition::Clouds,
            "rain" | "squall" => WeatherCondition::Rain,
            "drizzle" => WeatherCondition::Drizzle,
            "snow" => WeatherCondition::Snow,
            "thunderstorm" | "tornado" => WeatherCondition::Thunderstorm,
            "mist" | "fog" | "haze" | "smoke" | "dust" | "sand" => WeatherCondition::Mist,
            _ => return None,
        };
        Some(condition)
    }
}

impl<'de> Deserialize<'de> for WeatherCondition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let group = String::deserialize(deserializer)?;
        WeatherCondition::from_group(&group)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown weather condition `{group}`")))
    }
}

/// A weather observation or forecast for the event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Air temperature (°C)
    pub temperature_c: f64,
    pub condition: WeatherCondition,
    /// Wind speed (m/s)
    #[serde(default)]
    pub wind_speed_ms: f64,
}

/// Coarse reading of a weather factor for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherImpact {
    /// Above +15 %
    Excellent,
    /// +5 % to +15 %
    Good,
    Neutral,
    /// -5 % to -20 %
    LessFavorable,
    /// Worse than -20 %
    Unfavorable,
}

impl WeatherImpact {
    /// Classify a weather factor
    pub fn classify(factor: f64) -> Self {
        if factor > 1.15 {
            WeatherImpact::Excellent
        } else if factor > 1.05 {
            WeatherImpact::Good
        } else if factor > 0.95 {
            WeatherImpact::Neutral
        } else if factor > 0.8 {
            WeatherImpact::LessFavorable
        } else {
            WeatherImpact::Unfavorable
        }
    }

    /// Short label
    pub fn label(&self) -> &'static str {
        match self {
            WeatherImpact::Excellent => "excellent",
            WeatherImpact::Good => "good",
            WeatherImpact::Neutral => "neutral",
            WeatherImpact::LessFavorable => "less favorable",
            WeatherImpact::Unfavorable => "unfavorable",
        }
    }
}
