//! Weather demand factor
//!
//! Temperature uses discrete steps rather than a smooth curve: a comfortable
//! band, a hot band (melting and spoilage), a cold band (fewer visitors) and a
//! neutral mild band between cold and comfortable.

use super::WeatherObservation;
use crate::config::WeatherConfig;
use crate::event::Environment;
use crate::factors::bounded;

/// Lowest weather factor ever returned
pub const WEATHER_FACTOR_MIN: f64 = 0.2;
/// Highest weather factor ever returned
pub const WEATHER_FACTOR_MAX: f64 = 1.3;

/// Maps weather observations to demand factors
#[derive(Debug, Clone)]
pub struct WeatherAdjuster {
    config: WeatherConfig,
}

impl WeatherAdjuster {
    /// Create a new adjuster
    pub fn new(config: WeatherConfig) -> Self {
        Self { config }
    }

    /// Step factor for air temperature
    pub fn temperature_factor(&self, celsius: f64) -> f64 {
        let c = &self.config;
        if !celsius.is_finite() {
            return c.mild_factor;
        }

        if celsius > c.comfort_max_c {
            c.hot_factor
        } else if celsius >= c.comfort_min_c {
            c.comfort_factor
        } else if celsius < c.cold_threshold_c {
            c.cold_factor
        } else {
            c.mild_factor
        }
    }

    /// Unclamped factor for an open-air stand
    pub fn outdoor_factor(&self, observation: &WeatherObservation) -> f64 {
        let mut factor = self.temperature_factor(observation.temperature_c);
        factor *= self.config.conditions.get(observation.condition);
        if observation.wind_speed_ms > self.config.wind_threshold_ms {
            factor *= self.config.wind_factor;
        }
        factor
    }

    /// Demand factor for the given environment, within [0.2, 1.3]
    ///
    /// Missing observations are neutral.
    pub fn factor(&self, observation: Option<&WeatherObservation>, environment: Environment) -> f64 {
        let Some(observation) = observation else {
            return 1.0;
        };

        let outdoor = self.outdoor_factor(observation);
        let factor = match environment {
            Environment::Outdoor => outdoor,
            Environment::Indoor => self.indoor_factor(outdoor),
            Environment::Mixed => (outdoor + self.indoor_factor(outdoor)) / 2.0,
        };

        bounded(factor, WEATHER_FACTOR_MIN, WEATHER_FACTOR_MAX)
    }

    /// Whether heat puts product quality at risk
    pub fn quality_risk(&self, observation: Option<&WeatherObservation>, environment: Environment) -> bool {
        match observation {
            Some(obs) => {
                environment != Environment::Indoor && obs.temperature_c > self.config.quality_risk_temp_c
            }
            None => false,
        }
    }

    fn indoor_factor(&self, outdoor: f64) -> f64 {
        let damped = 1.0 + (outdoor - 1.0) * self.config.indoor_sensitivity;
        bounded(damped, self.config.indoor_min, self.config.indoor_max)
    }
}

impl Default for WeatherAdjuster {
    fn default() -> Self {
        Self::new(WeatherConfig::default())
    }
}
