//! Lenient cell parsing for spreadsheet exports
//!
//! Sheets carry dates as `DD.MM.YYYY` as often as ISO, and counts as
//! formatted text ("12 500", "1,250 osob"). Cells that cannot be read become
//! gaps instead of failing the whole file.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d.%m.%Y", "%d. %m. %Y", "%d/%m/%Y"];

#[derive(Deserialize)]
#[serde(untagged)]
enum CountCell {
    Whole(u64),
    Number(f64),
    Text(String),
}

/// `YYYY-MM-DD`, `DD.MM.YYYY`, `D. M. YYYY`, `DD/MM/YYYY` or an ISO timestamp
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|t| t.date())
        })
}

/// Digits of a formatted count; separators and unit suffixes are dropped
///
/// Negative or digit-free text reads as a gap.
fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.starts_with('-') {
        return None;
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

pub(super) fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

pub(super) fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Option::<CountCell>::deserialize(deserializer)? {
        None => None,
        Some(CountCell::Whole(n)) => Some(n),
        Some(CountCell::Number(n)) if n.is_finite() && n >= 0.0 => Some(n.round() as u64),
        Some(CountCell::Number(_)) => None,
        Some(CountCell::Text(text)) => parse_count(&text),
    };
    Ok(count)
}
