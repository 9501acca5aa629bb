//! `tripsync` CLI: recommend trip dates, inspect coverage, and render a
//! calendar overlay from availability JSON files.
//!
//! ## Usage
//!
//! ```sh
//! # Best 7-day window for a four-person trip (stdin → stdout)
//! cat availability.json | tripsync recommend --duration 7 --participants 4
//!
//! # Derive the trip length from planned trip dates
//! tripsync recommend -i availability.json --trip-start 2025-07-15 --trip-end 2025-07-19
//!
//! # Count each participant once per day, even with overlapping submissions
//! tripsync recommend -i availability.json --per-participant
//!
//! # Per-day coverage histogram
//! tripsync coverage -i availability.json
//!
//! # Calendar overlay for July with the recommended window marked
//! tripsync calendar -i availability.json --from 2025-07-01 --to 2025-07-31 --duration 7
//! ```
//!
//! Input is either a bare JSON array of `{participant_id, start, end}` objects
//! or a request object `{"intervals": [...], "duration_days": 7,
//! "total_participants": 4}`. Logs go to stderr (`RUST_LOG`, or `-v` for
//! debug) so stdout stays valid JSON.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use trip_optimizer::error::positive;
use trip_optimizer::{
    build_calendar, compute_day_coverage, participant_day_counts, recommend_with,
    trip_duration_days, CountingMode, DateRange, OptimizerConfig, RecommendRequest,
    Recommendation,
};

#[derive(Parser)]
#[command(
    name = "tripsync",
    version,
    about = "Recommend group trip dates from participant availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (max_span_days, default_duration_days, counting)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Reject availability spanning more than this many days
    #[arg(long, global = true, env = "TRIPSYNC_MAX_SPAN_DAYS")]
    max_span_days: Option<i64>,

    /// Trip length used when neither the input nor --duration gives one
    #[arg(long, global = true, env = "TRIPSYNC_DEFAULT_DURATION")]
    default_duration: Option<u32>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend the best trip window
    Recommend {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Trip length in days
        #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["trip_start", "trip_end"])]
        duration: Option<i64>,
        /// First day of the planned trip; with --trip-end sets the duration
        #[arg(long, requires = "trip_end")]
        trip_start: Option<NaiveDate>,
        /// Last day of the planned trip
        #[arg(long, requires = "trip_start")]
        trip_end: Option<NaiveDate>,
        /// Roster size used to normalize the score
        #[arg(long, allow_negative_numbers = true)]
        participants: Option<i64>,
        /// Count each participant at most once per day
        #[arg(long)]
        per_participant: bool,
    },
    /// Print the per-day coverage histogram
    Coverage {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Count each participant at most once per day
        #[arg(long)]
        per_participant: bool,
    },
    /// Print a day-by-day calendar overlay
    Calendar {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First day to render
        #[arg(long)]
        from: NaiveDate,
        /// Last day to render
        #[arg(long)]
        to: NaiveDate,
        /// Roster size (defaults to the number of submitters)
        #[arg(long, allow_negative_numbers = true)]
        participants: Option<i64>,
        /// Mark the recommended window of this length
        #[arg(long, allow_negative_numbers = true)]
        duration: Option<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Recommend {
            input,
            duration,
            trip_start,
            trip_end,
            participants,
            per_participant,
        } => {
            if per_participant {
                config.counting = CountingMode::PerParticipant;
            }
            let mut request = read_request(input.as_deref())?;
            if let (Some(start), Some(end)) = (trip_start, trip_end) {
                let days = trip_duration_days(start, end).context("Invalid trip dates")?;
                request.duration_days = Some(i64::from(days));
            }
            if duration.is_some() {
                request.duration_days = duration;
            }
            if participants.is_some() {
                request.total_participants = participants;
            }

            let recommendation = request
                .evaluate(&config)
                .context("Failed to compute a recommendation")?;
            match &recommendation {
                Recommendation::Window(w) => info!(
                    start = %w.start,
                    end = %w.end,
                    match_percent = w.match_percent,
                    "recommended window"
                ),
                Recommendation::InsufficientData {
                    distinct_days,
                    required_days,
                } => info!(
                    distinct_days,
                    required_days, "not enough availability data yet"
                ),
            }
            write_json(&recommendation)?;
        }
        Commands::Coverage {
            input,
            per_participant,
        } => {
            let request = read_request(input.as_deref())?;
            config.check_span(&request.intervals)?;
            let coverage = if per_participant {
                participant_day_counts(&request.intervals)
            } else {
                compute_day_coverage(&request.intervals)
            };
            debug!(days = coverage.len(), "computed coverage");
            let rows: Vec<serde_json::Value> = coverage
                .iter()
                .map(|(date, count)| serde_json::json!({ "date": date, "count": count }))
                .collect();
            write_json(&rows)?;
        }
        Commands::Calendar {
            input,
            from,
            to,
            participants,
            duration,
        } => {
            let mut request = read_request(input.as_deref())?;
            if participants.is_some() {
                request.total_participants = participants;
            }
            let total = request.total_participants()?;
            let span = DateRange::new(from, to).context("Invalid calendar range")?;
            config
                .check_range(span)
                .context("Calendar range too wide")?;
            config.check_span(&request.intervals)?;

            let recommendation = match duration {
                Some(days) => Some(recommend_with(
                    &config,
                    &request.intervals,
                    positive("duration", days)?,
                    total,
                )?),
                None => None,
            };
            let window = recommendation.as_ref().and_then(Recommendation::window);
            let calendar = build_calendar(&request.intervals, total, span, window);
            write_json(&calendar)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Layer the config: defaults, then `--config` file, then flags/env.
fn load_config(cli: &Cli) -> Result<OptimizerConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            OptimizerConfig::from_json(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => OptimizerConfig::default(),
    };

    if let Some(max_span_days) = cli.max_span_days {
        config.max_span_days = max_span_days;
    }
    if let Some(default_duration) = cli.default_duration {
        config.default_duration_days = default_duration;
    }
    config.validate()?;
    debug!(?config, "loaded optimizer config");
    Ok(config)
}

fn read_request(path: Option<&str>) -> Result<RecommendRequest> {
    let raw = read_input(path)?;
    RecommendRequest::from_json(&raw).context("Failed to parse availability JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{}", pretty);
    Ok(())
}
