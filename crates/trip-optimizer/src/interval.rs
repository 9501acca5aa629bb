//! Availability intervals and inclusive date ranges.
//!
//! All dates are [`NaiveDate`]: calendar days with no time-of-day or time
//! zone, so window arithmetic never drifts across a DST boundary.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{OptimizerError, Result};

/// Opaque identifier of a trip participant (typically a user id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An inclusive calendar-date range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawRange> for DateRange {
    type Error = OptimizerError;

    fn try_from(raw: RawRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// # Errors
    /// Returns `OptimizerError::InvalidArgument` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(OptimizerError::InvalidArgument(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The range of `days` consecutive days beginning at `start`.
    ///
    /// Returns `None` for `days == 0` or when the end would overflow the
    /// supported calendar.
    pub fn starting_at(start: NaiveDate, days: u32) -> Option<Self> {
        let offset = days.checked_sub(1)?;
        let end = start.checked_add_days(Days::new(u64::from(offset)))?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the range, counting both endpoints.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the range, ascending.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// One contiguous range during which a participant can travel.
///
/// A participant may contribute several intervals. Intervals are validated on
/// construction and on deserialization, so `start <= end` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct AvailabilityInterval {
    participant_id: ParticipantId,
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawInterval {
    #[serde(alias = "participantId", alias = "userId")]
    participant_id: ParticipantId,
    #[serde(alias = "startDate")]
    start: NaiveDate,
    #[serde(alias = "endDate")]
    end: NaiveDate,
}

impl TryFrom<RawInterval> for AvailabilityInterval {
    type Error = OptimizerError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        AvailabilityInterval::new(raw.participant_id, raw.start, raw.end)
    }
}

impl AvailabilityInterval {
    /// # Errors
    /// Returns `OptimizerError::InvalidArgument` if `start > end`.
    pub fn new(
        participant_id: impl Into<ParticipantId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self> {
        let participant_id = participant_id.into();
        if start > end {
            return Err(OptimizerError::InvalidArgument(format!(
                "availability for participant '{}' starts {} after it ends {}",
                participant_id, start, end
            )));
        }
        Ok(Self {
            participant_id,
            start,
            end,
        })
    }

    /// Infallible form of [`AvailabilityInterval::new`] for an already
    /// validated range.
    pub fn from_range(participant_id: impl Into<ParticipantId>, range: DateRange) -> Self {
        Self {
            participant_id: participant_id.into(),
            start: range.start,
            end: range.end,
        }
    }

    pub fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn days(&self) -> i64 {
        self.range().days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range().contains(date)
    }
}

/// Inclusive length in days of a trip running from `start` to `end`.
///
/// A trip that starts and ends on the same day lasts one day.
///
/// # Errors
/// Returns `OptimizerError::InvalidArgument` if `start > end` or the trip is
/// longer than `u32::MAX` days.
pub fn trip_duration_days(start: NaiveDate, end: NaiveDate) -> Result<u32> {
    let range = DateRange::new(start, end)?;
    u32::try_from(range.days()).map_err(|_| {
        OptimizerError::InvalidArgument(format!("trip {} is too long", range))
    })
}

/// Earliest start and latest end across `intervals`, or `None` when empty.
pub fn bounding_range(intervals: &[AvailabilityInterval]) -> Option<DateRange> {
    let start = intervals.iter().map(|i| i.start).min()?;
    let end = intervals.iter().map(|i| i.end).max()?;
    Some(DateRange { start, end })
}
