//! WASM bindings for trip-optimizer.
//!
//! Exposes trip-window recommendation, coverage histograms and the calendar
//! overlay to JavaScript via `wasm-bindgen`. All complex types cross the
//! boundary as JSON strings, and dates are `YYYY-MM-DD` strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p trip-optimizer-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/trip-optimizer-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/trip_optimizer_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/trip-optimizer-js/wasm/trip_optimizer_wasm.js \
//!    packages/trip-optimizer-js/wasm/trip_optimizer_wasm.cjs
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use trip_optimizer::{
    build_calendar, compute_day_coverage, participant_day_counts, recommend_with,
    trip_duration_days, AvailabilityInterval, DateRange, DayCoverage, OptimizerConfig,
    RecommendRequest,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DayCountDto {
    date: NaiveDate,
    count: u32,
}

fn day_counts(coverage: &DayCoverage) -> Vec<DayCountDto> {
    coverage
        .iter()
        .map(|(date, count)| DayCountDto {
            date: *date,
            count: *count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out, errors as strings
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    s.trim()
        .parse::<NaiveDate>()
        .map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_intervals_json(json: &str) -> Result<Vec<AvailabilityInterval>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid intervals JSON: {}", e))
}

fn parse_config(config_json: Option<&str>) -> Result<OptimizerConfig, String> {
    match config_json {
        Some(json) if !json.trim().is_empty() => {
            OptimizerConfig::from_json(json).map_err(|e| e.to_string())
        }
        _ => Ok(OptimizerConfig::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn recommend_json(request_json: &str, config_json: Option<&str>) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let request = RecommendRequest::from_json(request_json).map_err(|e| e.to_string())?;
    let recommendation = request.evaluate(&config).map_err(|e| e.to_string())?;
    to_json(&recommendation)
}

fn coverage_json(
    intervals_json: &str,
    config_json: Option<&str>,
    per_participant: bool,
) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let intervals = parse_intervals_json(intervals_json)?;
    config.check_span(&intervals).map_err(|e| e.to_string())?;
    let coverage = if per_participant {
        participant_day_counts(&intervals)
    } else {
        compute_day_coverage(&intervals)
    };
    to_json(&day_counts(&coverage))
}

fn calendar_json(
    intervals_json: &str,
    total_participants: u32,
    from: &str,
    to: &str,
    duration: Option<u32>,
    config_json: Option<&str>,
) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let intervals = parse_intervals_json(intervals_json)?;
    let span = DateRange::new(parse_date(from)?, parse_date(to)?).map_err(|e| e.to_string())?;
    config.check_range(span).map_err(|e| e.to_string())?;
    config.check_span(&intervals).map_err(|e| e.to_string())?;

    let recommendation = match duration {
        Some(days) => Some(
            recommend_with(&config, &intervals, days, total_participants)
                .map_err(|e| e.to_string())?,
        ),
        None => None,
    };
    let window = recommendation.as_ref().and_then(|r| r.window());

    to_json(&build_calendar(&intervals, total_participants, span, window))
}

fn trip_duration_json(start: &str, end: &str) -> Result<u32, String> {
    trip_duration_days(parse_date(start)?, parse_date(end)?).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Recommend the best trip window.
///
/// `request_json` is either `{"intervals": [...], "duration_days": 7,
/// "total_participants": 4}` or a bare array of `{participant_id, start, end}`
/// objects. `config_json` optionally overrides `max_span_days`,
/// `default_duration_days` and `counting`.
///
/// Returns `{"status": "window", start, end, score, raw_score, match_percent}`
/// or `{"status": "insufficient_data", distinct_days, required_days}`.
#[wasm_bindgen(js_name = "recommendDates")]
pub fn recommend_dates(request_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    recommend_json(request_json, config_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Per-day interval counts as a JSON array of `{date, count}`, ascending.
///
/// `config_json` optionally overrides `max_span_days`.
#[wasm_bindgen(js_name = "computeDayCoverage")]
pub fn compute_day_coverage_js(
    intervals_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    coverage_json(intervals_json, config_json.as_deref(), false)
        .map_err(|e| JsValue::from_str(&e))
}

/// Per-day distinct participant counts as a JSON array of `{date, count}`.
#[wasm_bindgen(js_name = "participantDayCounts")]
pub fn participant_day_counts_js(
    intervals_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    coverage_json(intervals_json, config_json.as_deref(), true)
        .map_err(|e| JsValue::from_str(&e))
}

/// Calendar overlay for every day from `from` to `to` (inclusive).
///
/// When `duration` is given, days inside the recommended window of that
/// length are flagged with `in_window`. Pass the same `config_json` as
/// `recommendDates` so both pick the same window.
#[wasm_bindgen(js_name = "buildCalendar")]
pub fn build_calendar_js(
    intervals_json: &str,
    total_participants: u32,
    from: &str,
    to: &str,
    duration: Option<u32>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    calendar_json(
        intervals_json,
        total_participants,
        from,
        to,
        duration,
        config_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Inclusive number of days from `start` to `end`.
#[wasm_bindgen(js_name = "tripDurationDays")]
pub fn trip_duration_days_js(start: &str, end: &str) -> Result<u32, JsValue> {
    trip_duration_json(start, end).map_err(|e| JsValue::from_str(&e))
}
