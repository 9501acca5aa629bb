//! Per-trip availability roster.
//!
//! Holds the active interval set of each participant of one trip. A new
//! submission from a participant replaces their previous set entirely; sets
//! are never accumulated across submissions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::interval::{AvailabilityInterval, DateRange, ParticipantId};
use crate::recommend::{recommend_with, OptimizerConfig, Recommendation};

/// Availability submissions for a single trip.
#[derive(Debug, Clone, Default)]
pub struct TripAvailability {
    roster_size: u32,
    submissions: BTreeMap<ParticipantId, Vec<DateRange>>,
}

impl TripAvailability {
    /// An empty roster expecting `roster_size` participants.
    pub fn new(roster_size: u32) -> Self {
        Self {
            roster_size,
            submissions: BTreeMap::new(),
        }
    }

    /// Replace `participant`'s availability with `ranges`.
    ///
    /// Returns the ranges that were superseded, if any. Submitting an empty
    /// set is allowed and records that the participant has no availability.
    pub fn submit(
        &mut self,
        participant: impl Into<ParticipantId>,
        mut ranges: Vec<DateRange>,
    ) -> Option<Vec<DateRange>> {
        let participant = participant.into();
        ranges.sort();
        debug!(participant = %participant, ranges = ranges.len(), "availability submitted");
        self.submissions.insert(participant, ranges)
    }

    /// Convenience for the common single-range submission.
    ///
    /// # Errors
    /// Returns `OptimizerError::InvalidArgument` if `start > end`; the roster
    /// is left unchanged.
    pub fn submit_range(
        &mut self,
        participant: impl Into<ParticipantId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Vec<DateRange>>> {
        let range = DateRange::new(start, end)?;
        Ok(self.submit(participant, vec![range]))
    }

    /// Drop a participant's submission. Returns what was removed.
    pub fn withdraw(&mut self, participant: &ParticipantId) -> Option<Vec<DateRange>> {
        self.submissions.remove(participant)
    }

    pub fn ranges_for(&self, participant: &ParticipantId) -> Option<&[DateRange]> {
        self.submissions.get(participant).map(Vec::as_slice)
    }

    /// Participants with an active submission, in id order.
    pub fn submitters(&self) -> impl Iterator<Item = &ParticipantId> {
        self.submissions.keys()
    }

    pub fn roster_size(&self) -> u32 {
        self.roster_size
    }

    pub fn set_roster_size(&mut self, roster_size: u32) {
        self.roster_size = roster_size;
    }

    /// The normalization base: the roster size, or the number of submitters
    /// if more people submitted than the roster expected.
    pub fn total_participants(&self) -> u32 {
        let submitters = u32::try_from(self.submissions.len()).unwrap_or(u32::MAX);
        self.roster_size.max(submitters)
    }

    /// A snapshot of every active interval, ordered by participant id, then
    /// start, then end.
    pub fn intervals(&self) -> Vec<AvailabilityInterval> {
        self.submissions
            .iter()
            .flat_map(|(participant, ranges)| {
                ranges
                    .iter()
                    .map(move |range| AvailabilityInterval::from_range(participant.clone(), *range))
            })
            .collect()
    }

    /// Run the optimizer over the current snapshot.
    pub fn recommend(&self, config: &OptimizerConfig, duration: u32) -> Result<Recommendation> {
        recommend_with(
            config,
            &self.intervals(),
            duration,
            self.total_participants(),
        )
    }
}
