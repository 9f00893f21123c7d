//! Day-of-week and time-of-day factors

use super::{bounded, CALENDAR_FACTOR_BOUNDS};
use crate::config::CalendarFactors;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

fn weekday_factor(config: &CalendarFactors, weekday: Weekday) -> f64 {
    let factor = match weekday {
        Weekday::Sat | Weekday::Sun => config.weekend,
        Weekday::Fri => config.friday,
        _ => config.weekday,
    };
    let (min, max) = CALENDAR_FACTOR_BOUNDS;
    bounded(factor, min, max)
}

pub(super) fn day_factor(config: &CalendarFactors, date: NaiveDate) -> f64 {
    weekday_factor(config, date.weekday())
}

/// Arithmetic mean over `days` consecutive days starting at `start`.
///
/// Whole weeks contribute the weekly sum, so the cost does not grow with
/// the duration.
pub(super) fn span_factor(config: &CalendarFactors, start: NaiveDate, days: u32) -> f64 {
    let days = days.max(1);
    let first = start.weekday();

    let sum_over = |count: u32| -> f64 {
        let mut weekday = first;
        let mut sum = 0.0;
        for _ in 0..count {
            sum += weekday_factor(config, weekday);
            weekday = weekday.succ();
        }
        sum
    };

    let full_weeks = days / 7;
    let total = full_weeks as f64 * sum_over(7) + sum_over(days % 7);
    total / days as f64
}

pub(super) fn time_factor(config: &CalendarFactors, time: Option<NaiveTime>) -> f64 {
    let factor = match time.map(|t| t.hour()) {
        None => config.unscheduled,
        Some(10..=14) => config.midday,
        Some(15..=18) => config.afternoon,
        Some(19..=21) => config.evening,
        Some(_) => config.off_hours,
    };
    let (min, max) = CALENDAR_FACTOR_BOUNDS;
    bounded(factor, min, max)
}
