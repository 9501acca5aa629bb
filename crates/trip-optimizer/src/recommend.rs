//! The composite entry point: intervals in, recommended trip window out.
//!
//! Every call recomputes from the full interval set it is given. Nothing is
//! cached between calls, so concurrent callers need no coordination.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coverage::{coverage_for, distinct_participants, CountingMode};
use crate::error::{non_negative, positive, OptimizerError, Result};
use crate::interval::{bounding_range, AvailabilityInterval, DateRange};
use crate::window::{find_optimal_window, OptimalWindow};

/// Default bound on the calendar span of one trip's availability data.
pub const DEFAULT_MAX_SPAN_DAYS: i64 = 730;

/// Trip length used when the caller has no trip dates yet.
pub const DEFAULT_DURATION_DAYS: u32 = 7;

/// Tunables for [`recommend_with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Largest allowed span, in days, from the earliest interval start to the
    /// latest interval end. Bounds the cost of one optimizer call.
    pub max_span_days: i64,
    /// Trip length for requests that do not carry one.
    pub default_duration_days: u32,
    /// How overlapping intervals from one participant are counted.
    pub counting: CountingMode,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_span_days: DEFAULT_MAX_SPAN_DAYS,
            default_duration_days: DEFAULT_DURATION_DAYS,
            counting: CountingMode::PerInterval,
        }
    }
}

impl OptimizerConfig {
    /// Parse a JSON config document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `OptimizerError::InvalidArgument` for a non-positive span bound
    /// or a zero default duration.
    pub fn validate(&self) -> Result<()> {
        if self.max_span_days < 1 {
            return Err(OptimizerError::InvalidArgument(format!(
                "max_span_days must be at least 1, got {}",
                self.max_span_days
            )));
        }
        if self.default_duration_days == 0 {
            return Err(OptimizerError::InvalidArgument(
                "default_duration_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Reject interval sets whose bounding range is wider than
    /// `max_span_days`. An empty set always passes.
    ///
    /// # Errors
    /// Returns `OptimizerError::SpanTooLarge` when the bound is exceeded.
    pub fn check_span(&self, intervals: &[AvailabilityInterval]) -> Result<()> {
        match bounding_range(intervals) {
            Some(span) => self.check_range(span),
            None => Ok(()),
        }
    }

    /// Reject a single date range (e.g. a calendar view) wider than
    /// `max_span_days`.
    pub fn check_range(&self, range: DateRange) -> Result<()> {
        if range.days() > self.max_span_days {
            return Err(OptimizerError::SpanTooLarge {
                span_days: range.days(),
                max_days: self.max_span_days,
            });
        }
        Ok(())
    }
}

/// Outcome of one recommendation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    /// A best window exists.
    Window(OptimalWindow),
    /// Fewer distinct available days than the trip needs. A normal state
    /// ("not enough availability data yet"), not a failure.
    InsufficientData {
        distinct_days: usize,
        required_days: u32,
    },
}

impl Recommendation {
    pub fn window(&self) -> Option<&OptimalWindow> {
        match self {
            Recommendation::Window(w) => Some(w),
            Recommendation::InsufficientData { .. } => None,
        }
    }

    pub fn into_window(self) -> Option<OptimalWindow> {
        match self {
            Recommendation::Window(w) => Some(w),
            Recommendation::InsufficientData { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Recommendation::InsufficientData { .. })
    }
}

/// Recommend the best `duration`-day window using the default config.
///
/// Equivalent to [`recommend_with`] with [`OptimizerConfig::default`].
pub fn recommend(
    intervals: &[AvailabilityInterval],
    duration: u32,
    total_participants: u32,
) -> Result<Recommendation> {
    recommend_with(
        &OptimizerConfig::default(),
        intervals,
        duration,
        total_participants,
    )
}

/// Recommend the best `duration`-day window for `intervals`.
///
/// Builds the coverage histogram for `config.counting`, then picks the window
/// with the highest total coverage (earliest wins a tie).
///
/// # Errors
/// - `OptimizerError::InvalidArgument` if `duration == 0`.
/// - `OptimizerError::SpanTooLarge` if the intervals cover more calendar days
///   than `config.max_span_days`.
pub fn recommend_with(
    config: &OptimizerConfig,
    intervals: &[AvailabilityInterval],
    duration: u32,
    total_participants: u32,
) -> Result<Recommendation> {
    if duration == 0 {
        return Err(OptimizerError::InvalidArgument(
            "duration must be at least 1 day".to_string(),
        ));
    }

    config.check_span(intervals)?;

    let coverage = coverage_for(config.counting, intervals);
    let outcome = match find_optimal_window(&coverage, duration, total_participants)? {
        Some(window) => Recommendation::Window(window),
        None => Recommendation::InsufficientData {
            distinct_days: coverage.len(),
            required_days: duration,
        },
    };

    match &outcome {
        Recommendation::Window(w) => debug!(
            intervals = intervals.len(),
            distinct_days = coverage.len(),
            duration,
            total_participants,
            start = %w.start,
            end = %w.end,
            score = w.score,
            "recommended trip window"
        ),
        Recommendation::InsufficientData { distinct_days, .. } => debug!(
            intervals = intervals.len(),
            distinct_days,
            duration,
            "not enough availability for a recommendation"
        ),
    }

    Ok(outcome)
}

/// A recommendation request as it arrives over a JSON boundary.
///
/// Counts are signed so that negative values from JavaScript or the command
/// line are rejected with a clear message instead of failing to parse.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    pub intervals: Vec<AvailabilityInterval>,
    #[serde(default, alias = "durationDays", alias = "duration")]
    pub duration_days: Option<i64>,
    #[serde(default, alias = "totalParticipants")]
    pub total_participants: Option<i64>,
}

impl RecommendRequest {
    /// Parse either a full request object or a bare array of intervals.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            return Ok(Self {
                intervals: serde_json::from_value(value)?,
                duration_days: None,
                total_participants: None,
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Trip length to evaluate, falling back to the config default.
    pub fn duration(&self, config: &OptimizerConfig) -> Result<u32> {
        match self.duration_days {
            Some(days) => positive("duration_days", days),
            None => Ok(config.default_duration_days),
        }
    }

    /// Roster size for score normalization. When absent, the number of
    /// participants who actually submitted availability.
    pub fn total_participants(&self) -> Result<u32> {
        match self.total_participants {
            Some(total) => non_negative("total_participants", total),
            None => non_negative(
                "total_participants",
                distinct_participants(&self.intervals) as i64,
            ),
        }
    }

    pub fn evaluate(&self, config: &OptimizerConfig) -> Result<Recommendation> {
        recommend_with(
            config,
            &self.intervals,
            self.duration(config)?,
            self.total_participants()?,
        )
    }
}
