//! Best contiguous trip window over a coverage histogram.
//!
//! Candidate windows are anchored at dates present in the histogram and run for
//! `duration` consecutive calendar days. Gaps inside a window count as zero
//! coverage. Only the first `len - duration + 1` known dates are used as
//! anchors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::coverage::DayCoverage;
use crate::error::{OptimizerError, Result};
use crate::interval::DateRange;

/// The winning window of one optimizer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalWindow {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Last day of the window (inclusive). `end - start + 1 == duration`.
    pub end: NaiveDate,
    /// `raw_score / (duration * total_participants)`, clamped to `[0, 1]`.
    /// Zero when the roster is empty.
    pub score: f64,
    /// Sum of coverage counts over every day in the window.
    pub raw_score: u64,
    /// `score` as a whole percentage, rounded to nearest ("96% availability match").
    pub match_percent: u8,
}

impl OptimalWindow {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Find the `duration`-day window with the highest total coverage.
///
/// Ties go to the earliest start date. Returns `Ok(None)` when the histogram
/// holds fewer than `duration` distinct dates (including when it is empty).
///
/// # Errors
/// Returns `OptimizerError::InvalidArgument` if `duration == 0`.
pub fn find_optimal_window(
    coverage: &DayCoverage,
    duration: u32,
    total_participants: u32,
) -> Result<Option<OptimalWindow>> {
    if duration == 0 {
        return Err(OptimizerError::InvalidArgument(
            "duration must be at least 1 day".to_string(),
        ));
    }

    let required = duration as usize;
    if coverage.len() < required {
        return Ok(None);
    }
    let anchors = coverage.len() - required + 1;

    let mut best: Option<(DateRange, u64)> = None;
    for &start in coverage.keys().take(anchors) {
        let Some(candidate) = DateRange::starting_at(start, duration) else {
            continue;
        };
        let raw = window_sum(coverage, candidate);
        trace!(start = %candidate.start(), end = %candidate.end(), raw, "scored candidate window");

        // Strictly greater only, so the earliest anchor keeps a tie.
        if best.is_none_or(|(_, best_raw)| raw > best_raw) {
            best = Some((candidate, raw));
        }
    }

    Ok(best.map(|(range, raw_score)| {
        let score = normalize(raw_score, duration, total_participants);
        OptimalWindow {
            start: range.start(),
            end: range.end(),
            score,
            raw_score,
            match_percent: percent(score),
        }
    }))
}

/// Total coverage over every calendar day of `range`; missing days add zero.
pub fn window_sum(coverage: &DayCoverage, range: DateRange) -> u64 {
    coverage
        .range(range.start()..=range.end())
        .map(|(_, count)| u64::from(*count))
        .sum()
}

fn normalize(raw_score: u64, duration: u32, total_participants: u32) -> f64 {
    if total_participants == 0 {
        return 0.0;
    }
    let max_possible = f64::from(duration) * f64::from(total_participants);
    (raw_score as f64 / max_possible).clamp(0.0, 1.0)
}

fn percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn normalize_zero_roster_is_zero() {
        assert_eq!(normalize(10, 3, 0), 0.0);
    }

    #[test]
    fn normalize_clamps_overcounted_coverage() {
        // Three intervals on one day but a roster of two.
        assert_eq!(normalize(3, 1, 2), 1.0);
    }

    #[test]
    fn window_sum_treats_gaps_as_zero() {
        let coverage: DayCoverage = [(d(1, 1), 2), (d(1, 3), 5)].into_iter().collect();
        let range = DateRange::new(d(1, 1), d(1, 3)).unwrap();
        assert_eq!(window_sum(&coverage, range), 7);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent(27.0 / 28.0), 96);
        assert_eq!(percent(0.5), 50);
        assert_eq!(percent(0.0), 0);
    }

    #[test]
    fn single_known_day_with_one_day_duration() {
        let coverage: DayCoverage = [(d(3, 9), 2)].into_iter().collect();
        let w = find_optimal_window(&coverage, 1, 4).unwrap().unwrap();
        assert_eq!(w.start, d(3, 9));
        assert_eq!(w.end, d(3, 9));
        assert_eq!(w.days(), 1);
        assert_eq!(w.match_percent, 50);
    }
}
