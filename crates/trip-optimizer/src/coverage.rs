//! Per-day availability histograms.
//!
//! A [`DayCoverage`] maps each date to the number of availability entries that
//! cover it. The map is sparse: days nobody covers are absent rather than
//! stored with a zero count. It is a `BTreeMap`, so iteration is always
//! ascending by date whatever order the intervals arrived in.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::interval::{AvailabilityInterval, ParticipantId};

/// Sparse `date -> count` histogram, ascending by date.
pub type DayCoverage = BTreeMap<NaiveDate, u32>;

/// How overlapping intervals from the same participant are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMode {
    /// Every covering interval adds one, even when a participant submitted
    /// two overlapping ranges.
    #[default]
    PerInterval,
    /// A participant adds at most one per day no matter how many of their
    /// intervals cover it.
    PerParticipant,
}

/// Count, for every date, how many intervals cover it.
///
/// Counting is per interval: two overlapping intervals from one participant
/// contribute two on each shared day. Use [`participant_day_counts`] for the
/// deduplicated view.
pub fn compute_day_coverage(intervals: &[AvailabilityInterval]) -> DayCoverage {
    intervals
        .iter()
        .flat_map(|interval| interval.range().iter_days())
        .fold(DayCoverage::new(), |mut coverage, day| {
            let count = coverage.entry(day).or_insert(0);
            *count = count.saturating_add(1);
            coverage
        })
}

/// Count, for every date, how many distinct participants are available.
pub fn participant_day_counts(intervals: &[AvailabilityInterval]) -> DayCoverage {
    let covered: BTreeSet<(NaiveDate, &ParticipantId)> = intervals
        .iter()
        .flat_map(|interval| {
            interval
                .range()
                .iter_days()
                .map(move |day| (day, interval.participant_id()))
        })
        .collect();

    covered
        .into_iter()
        .fold(DayCoverage::new(), |mut coverage, (day, _)| {
            *coverage.entry(day).or_insert(0) += 1;
            coverage
        })
}

/// Build the histogram for the given counting mode.
pub fn coverage_for(mode: CountingMode, intervals: &[AvailabilityInterval]) -> DayCoverage {
    match mode {
        CountingMode::PerInterval => compute_day_coverage(intervals),
        CountingMode::PerParticipant => participant_day_counts(intervals),
    }
}

/// Number of distinct participants that contributed at least one interval.
pub fn distinct_participants(intervals: &[AvailabilityInterval]) -> usize {
    intervals
        .iter()
        .map(AvailabilityInterval::participant_id)
        .collect::<BTreeSet<_>>()
        .len()
}
