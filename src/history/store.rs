//! In-memory historical store
//!
//! Similarity scoring awards points per matching attribute:
//! - category identical: 3
//! - location overlaps (first comma token, case and diacritics ignored): 2
//! - attendance within 0.5x-2.0x of the expected attendance: 1

use super::HistoricalEvent;
use crate::config::ModelConfig;
use crate::event::{fold_label, location_key, EventCategory, EventInput};
use crate::factors::bounded;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

const CATEGORY_POINTS: u8 = 3;
const LOCATION_POINTS: u8 = 2;
const ATTENDANCE_POINTS: u8 = 1;

const CATEGORY_WEIGHT: f64 = 3.0;
const LOCATION_WEIGHT: f64 = 2.0;

const ATTENDANCE_RATIO_MIN: f64 = 0.5;
const ATTENDANCE_RATIO_MAX: f64 = 2.0;

/// A past event that resembles the request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarEvent<'a> {
    pub event: &'a HistoricalEvent,
    /// Similarity points, 0-6
    pub score: u8,
}

/// Data completeness summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_records: usize,
    /// Records with positive attendance and sales
    pub complete_records: usize,
    /// complete / total, 0.0 for an empty store
    pub completion_rate: f64,
    pub categories: Vec<EventCategory>,
    /// Distinct location names (first spelling seen)
    pub locations: Vec<String>,
    /// Mean attendance over records that report it, rounded
    pub average_attendance: Option<u64>,
    /// Category with the highest mean sales per complete record
    pub most_successful_category: Option<EventCategory>,
}

/// Record filter; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub category: Option<EventCategory>,
    /// Substring of the location, case and diacritics ignored
    pub location: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub complete_only: bool,
}

/// Read-only set of past events
///
/// The dataset is an immutable shared slice: `load` swaps it out wholesale and
/// clones of the store share it without copying.
#[derive(Debug, Clone)]
pub struct HistoricalStore {
    events: Arc<[HistoricalEvent]>,
    config: ModelConfig,
}

impl HistoricalStore {
    /// Create an empty store
    pub fn new(config: ModelConfig) -> Self {
        Self {
            events: Arc::from(Vec::new()),
            config,
        }
    }

    /// Create a store holding `events`
    pub fn with_events(config: ModelConfig, events: Vec<HistoricalEvent>) -> Self {
        let mut store = Self::new(config);
        store.load(events);
        store
    }

    /// Replace the working set
    pub fn load(&mut self, events: Vec<HistoricalEvent>) {
        self.events = Arc::from(events);
        tracing::info!(
            records = self.events.len(),
            complete = self.complete_events().count(),
            "Historical data loaded"
        );
    }

    /// All records
    pub fn events(&self) -> &[HistoricalEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Similarity points of `event` against the request, 0-6
    pub fn similarity_score(&self, event: &HistoricalEvent, input: &EventInput) -> u8 {
        let mut score = 0;
        if event.category == input.category {
            score += CATEGORY_POINTS;
        }
        if locations_match(&event.location, &input.location) {
            score += LOCATION_POINTS;
        }
        if let Some(ratio) = attendance_ratio(event, input.expected_attendees) {
            if (ATTENDANCE_RATIO_MIN..=ATTENDANCE_RATIO_MAX).contains(&ratio) {
                score += ATTENDANCE_POINTS;
            }
        }
        score
    }

    /// Events scoring at least the similarity threshold, best first
    pub fn find_similar(&self, input: &EventInput) -> Vec<SimilarEvent<'_>> {
        let mut similar: Vec<SimilarEvent<'_>> = self
            .events
            .iter()
            .map(|event| SimilarEvent {
                event,
                score: self.similarity_score(event, input),
            })
            .filter(|s| s.score >= self.config.similarity_threshold)
            .collect();

        similar.sort_by(|a, b| b.score.cmp(&a.score));
        similar
    }

    /// Similar events that carry both attendance and sales
    ///
    /// Only these feed the historical factor, so only these count as evidence.
    pub fn similar_with_sales(&self, input: &EventInput) -> usize {
        self.find_similar(input)
            .iter()
            .filter(|s| s.event.conversion_rate().is_some())
            .count()
    }

    /// Mean conversion over complete records, or the base rate when none exist
    pub fn overall_average_conversion(&self) -> f64 {
        mean(self.complete_events().filter_map(HistoricalEvent::conversion_rate))
            .unwrap_or(self.config.base_conversion_rate)
    }

    /// Similarity-weighted conversion relative to the base rate
    ///
    /// Each similar complete event is weighted by category match (3x),
    /// location match (2x) and how close its attendance is to the expected
    /// one. Without similar events the dataset-wide average is used.
    pub fn weighted_historical_factor(&self, input: &EventInput) -> f64 {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for similar in self.find_similar(input) {
            let event = similar.event;
            let Some(rate) = event.conversion_rate() else {
                continue;
            };
            let Some(ratio) = attendance_ratio(event, input.expected_attendees) else {
                continue;
            };

            let mut weight = ratio.min(1.0 / ratio);
            if event.category == input.category {
                weight *= CATEGORY_WEIGHT;
            }
            if locations_match(&event.location, &input.location) {
                weight *= LOCATION_WEIGHT;
            }

            weighted_sum += weight * rate;
            weight_total += weight;
        }

        let conversion = if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            self.overall_average_conversion()
        };

        bounded(
            conversion / self.config.base_conversion_rate,
            self.config.historical_factor_min,
            self.config.historical_factor_max,
        )
    }

    /// Complete records held at the request's location
    pub fn location_matches(&self, input: &EventInput) -> usize {
        self.complete_events()
            .filter(|e| locations_match(&e.location, &input.location))
            .count()
    }

    /// Popularity of the location relative to the dataset average
    ///
    /// Neutral until enough complete records exist for the location.
    pub fn location_factor(&self, input: &EventInput) -> f64 {
        let rates: Vec<f64> = self
            .complete_events()
            .filter(|e| locations_match(&e.location, &input.location))
            .filter_map(HistoricalEvent::conversion_rate)
            .collect();

        if rates.len() < self.config.min_location_events {
            return 1.0;
        }

        let Some(location_average) = mean(rates.into_iter()) else {
            return 1.0;
        };

        bounded(
            location_average / self.overall_average_conversion(),
            self.config.location_factor_min,
            self.config.location_factor_max,
        )
    }

    /// Completeness and coverage summary
    pub fn stats(&self) -> DatasetStats {
        let total_records = self.events.len();
        let complete_records = self.complete_events().count();

        let categories: BTreeSet<EventCategory> = self.events.iter().map(|e| e.category).collect();

        let mut seen = BTreeSet::new();
        let mut locations = Vec::new();
        for event in self.events.iter() {
            let name = event.location.trim();
            if name.is_empty() {
                continue;
            }
            if seen.insert(fold_label(name)) {
                locations.push(name.to_string());
            }
        }
        locations.sort();

        let average_attendance = mean(
            self.events
                .iter()
                .filter_map(|e| e.attendees)
                .filter(|&a| a > 0)
                .map(|a| a as f64),
        )
        .map(|a| a.round() as u64);

        DatasetStats {
            total_records,
            complete_records,
            completion_rate: if total_records > 0 {
                complete_records as f64 / total_records as f64
            } else {
                0.0
            },
            categories: categories.into_iter().collect(),
            locations,
            average_attendance,
            most_successful_category: self.most_successful_category(),
        }
    }

    /// Category whose complete records sold the most on average
    fn most_successful_category(&self) -> Option<EventCategory> {
        let mut sales: BTreeMap<EventCategory, Vec<f64>> = BTreeMap::new();
        for event in self.complete_events() {
            if let Some(sold) = event.actual_sales {
                sales.entry(event.category).or_default().push(sold as f64);
            }
        }

        let mut best: Option<(EventCategory, f64)> = None;
        for (category, sold) in sales {
            let Some(average) = mean(sold.into_iter()) else {
                continue;
            };
            if best.map_or(true, |(_, top)| average > top) {
                best = Some((category, average));
            }
        }
        best.map(|(category, _)| category)
    }

    /// Records matching every set field of `filter`
    pub fn filter(&self, filter: &HistoryFilter) -> Vec<&HistoricalEvent> {
        let needle = filter.location.as_deref().map(fold_label);

        self.events
            .iter()
            .filter(|e| filter.category.map_or(true, |c| e.category == c))
            .filter(|e| {
                needle
                    .as_deref()
                    .map_or(true, |n| fold_label(&e.location).contains(n))
            })
            .filter(|e| match filter.date_from {
                Some(from) => e.date.is_some_and(|d| d >= from),
                None => true,
            })
            .filter(|e| match filter.date_to {
                Some(to) => e.date.is_some_and(|d| d <= to),
                None => true,
            })
            .filter(|e| !filter.complete_only || e.is_complete())
            .collect()
    }

    fn complete_events(&self) -> impl Iterator<Item = &HistoricalEvent> + '_ {
        self.events.iter().filter(|e| e.is_complete())
    }
}

impl Default for HistoricalStore {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

fn locations_match(a: &str, b: &str) -> bool {
    let a = location_key(a);
    let b = location_key(b);
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

/// Past attendance divided by expected attendance
fn attendance_ratio(event: &HistoricalEvent, expected: u64) -> Option<f64> {
    match event.attendees {
        Some(attendees) if attendees > 0 && expected > 0 => Some(attendees as f64 / expected as f64),
        _ => None,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
