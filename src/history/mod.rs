//! Historical events module
//!
//! Past events with known attendance and sales, and the similarity-weighted
//! aggregates the prediction engine draws from them

mod loader;
mod shared;
mod sheet;
mod store;

pub use loader::load_events_json;
pub use shared::SharedHistory;
pub use store::{DatasetStats, HistoricalStore, HistoryFilter, SimilarEvent};

use crate::event::EventCategory;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A past occurrence of an event
///
/// Attendance or sales may be missing in the source sheet; such records are
/// kept for statistics but never enter conversion averages. Counts and dates
/// are read leniently, so formatted sheet cells load as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "EventCategory::deserialize_lenient")]
    pub category: EventCategory,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "sheet::deserialize_count")]
    pub attendees: Option<u64>,
    #[serde(default, deserialize_with = "sheet::deserialize_count")]
    pub actual_sales: Option<u64>,
    #[serde(default, deserialize_with = "sheet::deserialize_date")]
    pub date: Option<NaiveDate>,
}

impl HistoricalEvent {
    /// Create a complete record
    pub fn new(
        category: EventCategory,
        location: impl Into<String>,
        attendees: u64,
        actual_sales: u64,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name: None,
            category,
            location: location.into(),
            attendees: Some(attendees),
            actual_sales: Some(actual_sales),
            date,
        }
    }

    /// Units sold per attendee, if both figures are known and positive
    pub fn conversion_rate(&self) -> Option<f64> {
        match (self.attendees, self.actual_sales) {
            (Some(attendees), Some(sales)) if attendees > 0 && sales > 0 => {
                Some(sales as f64 / attendees as f64)
            }
            _ => None,
        }
    }

    /// Whether the record can enter conversion averages
    pub fn is_complete(&self) -> bool {
        self.conversion_rate().is_some()
    }
}

/// Trait for historical data providers shared across sessions
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Current dataset; never a partially replaced one
    async fn snapshot(&self) -> Arc<HistoricalStore>;
    /// Replace the dataset wholesale, returning the new record count
    async fn replace(&self, events: Vec<HistoricalEvent>) -> usize;
    /// Reload the dataset from a JSON file
    async fn refresh_from(&self, path: &Path) -> anyhow::Result<usize>;
}
