//! Event input types

use super::label::fold_label;
use crate::business::RentalTerms;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    FoodFestival,
    ChocolateFestival,
    FamilyFestival,
    Cultural,
    Sporting,
    TradeFair,
    Concert,
    Other,
}

impl EventCategory {
    /// All categories in table order
    pub const ALL: [EventCategory; 8] = [
        EventCategory::FoodFestival,
        EventCategory::ChocolateFestival,
        EventCategory::FamilyFestival,
        EventCategory::Cultural,
        EventCategory::Sporting,
        EventCategory::TradeFair,
        EventCategory::Concert,
        EventCategory::Other,
    ];

    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::FoodFestival => "food_festival",
            EventCategory::ChocolateFestival => "chocolate_festival",
            EventCategory::FamilyFestival => "family_festival",
            EventCategory::Cultural => "cultural",
            EventCategory::Sporting => "sporting",
            EventCategory::TradeFair => "trade_fair",
            EventCategory::Concert => "concert",
            EventCategory::Other => "other",
        }
    }

    /// Parse a free-text label (English or Czech, any case, with or without diacritics)
    pub fn from_label(label: &str) -> Option<Self> {
        let category = match fold_label(label).as_str() {
            "food festival" | "food fest" | "gastro festival" => EventCategory::FoodFestival,
            "chocolate festival" | "cokoladovy festival" => EventCategory::ChocolateFestival,
            "family festival" | "rodinny festival" => EventCategory::FamilyFestival,
            "cultural" | "culture" | "kulturni" | "kulturni akce" => EventCategory::Cultural,
            "sporting" | "sport" | "sportovni" | "sportovni akce" => EventCategory::Sporting,
            "trade fair" | "fair" | "veletrh" => EventCategory::TradeFair,
            "concert" | "koncert" => EventCategory::Concert,
            "other" | "ostatni" => EventCategory::Other,
            _ => return None,
        };
        Some(category)
    }

    /// Lenient deserializer for spreadsheet data: unknown labels become `Other`
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label).unwrap_or(EventCategory::Other))
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown event category: {s}"))
    }
}

/// Where the stand operates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Outdoor,
    Indoor,
    Mixed,
}

/// Operating arrangement that decides labor cost and profit allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessModel {
    /// Owner-operated with two hired helpers
    #[default]
    Owner,
    /// Run by an employee paid a wage plus a revenue share
    Employee,
    /// Franchisee buying units from the operator
    #[serde(alias = "franchisee")]
    Franchise,
}

/// A request to predict sales for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    /// Display name, not used by the model
    #[serde(default)]
    pub name: Option<String>,
    pub category: EventCategory,
    pub expected_attendees: u64,
    pub duration_days: u32,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    /// Opening time, `HH:MM`
    #[serde(default, with = "clock_time")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub business_model: BusinessModel,
    pub price_per_unit: Decimal,
    pub cost_per_unit: Decimal,
    #[serde(default)]
    pub transport_cost: Decimal,
    #[serde(default)]
    pub other_fixed_costs: Decimal,
    #[serde(default)]
    pub rental: RentalTerms,
}

/// `HH:MM` (or `HH:MM:SS`) clock time
mod clock_time {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveTime::parse_from_str(s, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid time {s:?}: {e}"))),
        }
    }
}
