//! Confidence score
//!
//! Heuristic 0-100 score starting at a base value:
//! - more similar past events raise it, up to a cap
//! - a more complete dataset raises it
//! - a weather observation raises it
//! - very large or very small events lower it
//!
//! The result is always within [20, 95].

use crate::config::ConfidenceConfig;

/// Lowest confidence ever reported
pub const CONFIDENCE_MIN: u8 = 20;
/// Highest confidence ever reported
pub const CONFIDENCE_MAX: u8 = 95;

/// Evidence the score is computed from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evidence {
    pub similar_events: usize,
    /// Share of complete records, `None` for an empty store
    pub completion_rate: Option<f64>,
    pub has_weather: bool,
    pub expected_attendees: u64,
}

/// Scores how much a prediction can be trusted
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
}

impl ConfidenceScorer {
    /// Create a new scorer
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    /// Score the evidence, clamped to [20, 95]
    pub fn score(&self, evidence: &Evidence) -> u8 {
        let c = &self.config;
        let mut score = f64::from(c.base);

        let similar = i64::try_from(evidence.similar_events).unwrap_or(i64::MAX);
        let similar_bonus = similar
            .saturating_mul(i64::from(c.per_similar_event))
            .min(i64::from(c.max_similar_bonus));
        score += similar_bonus as f64;

        if let Some(rate) = evidence.completion_rate {
            if rate.is_finite() {
                score += f64::from(c.max_completeness_bonus) * rate.clamp(0.0, 1.0);
            }
        }

        if evidence.has_weather {
            score += f64::from(c.weather_bonus);
        }

        if evidence.expected_attendees > c.large_event_attendees {
            score -= f64::from(c.large_event_penalty);
        }
        if evidence.expected_attendees < c.small_event_attendees {
            score -= f64::from(c.small_event_penalty);
        }

        score
            .round()
            .clamp(f64::from(CONFIDENCE_MIN), f64::from(CONFIDENCE_MAX)) as u8
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(ConfidenceConfig::default())
    }
}
