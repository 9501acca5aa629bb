//! Day-by-day availability overlay for a trip calendar.
//!
//! Each day reports how many distinct participants can travel, whether the
//! whole group is free, and whether it falls inside the recommended window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::coverage::participant_day_counts;
use crate::interval::{AvailabilityInterval, DateRange};
use crate::window::OptimalWindow;

/// Group availability on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Every expected participant is available.
    Full,
    /// Some, but not all, participants are available.
    Partial,
    /// Nobody is available.
    None,
}

impl DayStatus {
    pub fn classify(available: u32, total: u32) -> Self {
        match available {
            0 => DayStatus::None,
            n if total > 0 && n >= total => DayStatus::Full,
            _ => DayStatus::Partial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Distinct participants available on `date`.
    pub available: u32,
    pub total: u32,
    pub status: DayStatus,
    /// `date` lies inside the recommended window.
    pub in_window: bool,
}

/// One [`CalendarDay`] for every date of `span`, ascending.
pub fn build_calendar(
    intervals: &[AvailabilityInterval],
    total_participants: u32,
    span: DateRange,
    window: Option<&OptimalWindow>,
) -> Vec<CalendarDay> {
    let counts = participant_day_counts(intervals);

    span.iter_days()
        .map(|date| {
            let available = counts.get(&date).copied().unwrap_or(0);
            CalendarDay {
                date,
                available,
                total: total_participants,
                status: DayStatus::classify(available, total_participants),
                in_window: window.is_some_and(|w| w.contains(date)),
            }
        })
        .collect()
}
