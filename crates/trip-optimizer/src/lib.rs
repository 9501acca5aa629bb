//! # trip-optimizer
//!
//! Group availability aggregation and optimal trip-window selection.
//!
//! Participants of a trip submit the date ranges they can travel. The optimizer
//! folds those ranges into a per-day coverage histogram, then scans every
//! candidate window of the requested trip length and returns the one the most
//! people can make, with a normalized score.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use trip_optimizer::{recommend, AvailabilityInterval, Recommendation};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
//! let intervals = vec![
//!     AvailabilityInterval::new("ana", day(1), day(10)).unwrap(),
//!     AvailabilityInterval::new("ben", day(4), day(12)).unwrap(),
//! ];
//!
//! let Recommendation::Window(w) = recommend(&intervals, 3, 2).unwrap() else {
//!     panic!("expected a window");
//! };
//! assert_eq!((w.start, w.end), (day(4), day(6)));
//! assert_eq!(w.score, 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — validated availability intervals and date ranges
//! - [`coverage`] — per-day coverage histograms
//! - [`window`] — best contiguous window over a histogram
//! - [`recommend`] — composite entry point, config, JSON request type
//! - [`roster`] — per-trip submissions with replace-on-resubmit semantics
//! - [`calendar`] — day-by-day overlay for calendar display
//! - [`error`] — error types

pub mod calendar;
pub mod coverage;
pub mod error;
pub mod interval;
pub mod recommend;
pub mod roster;
pub mod window;

pub use calendar::{build_calendar, CalendarDay, DayStatus};
pub use coverage::{compute_day_coverage, participant_day_counts, CountingMode, DayCoverage};
pub use error::OptimizerError;
pub use interval::{trip_duration_days, AvailabilityInterval, DateRange, ParticipantId};
pub use recommend::{recommend, recommend_with, OptimizerConfig, RecommendRequest, Recommendation};
pub use roster::TripAvailability;
pub use window::{find_optimal_window, OptimalWindow};
