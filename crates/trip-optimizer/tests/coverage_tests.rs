//! Tests for per-day coverage histograms.

use chrono::NaiveDate;
use trip_optimizer::coverage::{
    compute_day_coverage, coverage_for, distinct_participants, participant_day_counts, CountingMode,
};
use trip_optimizer::AvailabilityInterval;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn interval(who: &str, start: &str, end: &str) -> AvailabilityInterval {
    AvailabilityInterval::new(who, date(start), date(end)).unwrap()
}

// ── compute_day_coverage ────────────────────────────────────────────────────

#[test]
fn empty_input_yields_empty_map() {
    assert!(compute_day_coverage(&[]).is_empty());
}

#[test]
fn single_interval_covers_each_day_once() {
    let coverage = compute_day_coverage(&[interval("a", "2025-08-01", "2025-08-03")]);

    assert_eq!(coverage.len(), 3);
    assert_eq!(coverage[&date("2025-08-01")], 1);
    assert_eq!(coverage[&date("2025-08-02")], 1);
    assert_eq!(coverage[&date("2025-08-03")], 1);
}

#[test]
fn single_day_interval() {
    let coverage = compute_day_coverage(&[interval("a", "2025-08-01", "2025-08-01")]);
    assert_eq!(coverage.len(), 1);
    assert_eq!(coverage[&date("2025-08-01")], 1);
}

#[test]
fn overlapping_participants_add_up() {
    // a: 1-5, b: 3-7 → 3,4,5 covered twice
    let coverage = compute_day_coverage(&[
        interval("a", "2025-03-01", "2025-03-05"),
        interval("b", "2025-03-03", "2025-03-07"),
    ]);

    assert_eq!(coverage.len(), 7);
    assert_eq!(coverage[&date("2025-03-02")], 1);
    assert_eq!(coverage[&date("2025-03-03")], 2);
    assert_eq!(coverage[&date("2025-03-05")], 2);
    assert_eq!(coverage[&date("2025-03-06")], 1);
}

#[test]
fn gaps_are_absent_not_zero() {
    let coverage = compute_day_coverage(&[
        interval("a", "2025-01-01", "2025-01-02"),
        interval("b", "2025-01-10", "2025-01-11"),
    ]);

    assert_eq!(coverage.len(), 4);
    assert!(!coverage.contains_key(&date("2025-01-05")));
    assert!(coverage.values().all(|&c| c > 0));
}

#[test]
fn same_participant_overlap_counts_per_interval() {
    // One participant submitted two overlapping ranges; each covering interval counts.
    let coverage = compute_day_coverage(&[
        interval("a", "2025-05-01", "2025-05-04"),
        interval("a", "2025-05-03", "2025-05-06"),
    ]);

    assert_eq!(coverage[&date("2025-05-02")], 1);
    assert_eq!(coverage[&date("2025-05-03")], 2);
    assert_eq!(coverage[&date("2025-05-04")], 2);
    assert_eq!(coverage[&date("2025-05-05")], 1);
}

#[test]
fn spans_month_and_leap_day_boundaries() {
    let coverage = compute_day_coverage(&[interval("a", "2024-02-27", "2024-03-02")]);

    let days: Vec<NaiveDate> = coverage.keys().copied().collect();
    assert_eq!(
        days,
        vec![
            date("2024-02-27"),
            date("2024-02-28"),
            date("2024-02-29"),
            date("2024-03-01"),
            date("2024-03-02"),
        ]
    );
}

#[test]
fn input_order_does_not_matter() {
    let a = interval("a", "2025-07-15", "2025-07-25");
    let b = interval("b", "2025-07-10", "2025-07-20");
    let c = interval("c", "2025-07-15", "2025-07-22");

    let forward = compute_day_coverage(&[a.clone(), b.clone(), c.clone()]);
    let reversed = compute_day_coverage(&[c, b, a]);

    assert_eq!(forward, reversed);
}

#[test]
fn keys_iterate_in_ascending_order() {
    let coverage = compute_day_coverage(&[
        interval("b", "2025-09-10", "2025-09-11"),
        interval("a", "2025-09-01", "2025-09-02"),
    ]);

    let keys: Vec<NaiveDate> = coverage.keys().copied().collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

// ── participant_day_counts ──────────────────────────────────────────────────

#[test]
fn participant_counts_deduplicate_same_participant() {
    let intervals = [
        interval("a", "2025-05-01", "2025-05-04"),
        interval("a", "2025-05-03", "2025-05-06"),
        interval("b", "2025-05-04", "2025-05-04"),
    ];
    let counts = participant_day_counts(&intervals);

    assert_eq!(counts[&date("2025-05-03")], 1);
    assert_eq!(counts[&date("2025-05-04")], 2);
    assert_eq!(counts.len(), 6);
}

#[test]
fn participant_counts_never_exceed_interval_counts() {
    let intervals = [
        interval("a", "2025-05-01", "2025-05-10"),
        interval("a", "2025-05-05", "2025-05-12"),
        interval("b", "2025-05-03", "2025-05-07"),
    ];
    let per_interval = compute_day_coverage(&intervals);
    let per_participant = participant_day_counts(&intervals);

    assert_eq!(
        per_interval.keys().collect::<Vec<_>>(),
        per_participant.keys().collect::<Vec<_>>()
    );
    for (day, count) in &per_participant {
        assert!(*count <= per_interval[day]);
    }
}

#[test]
fn coverage_for_dispatches_on_mode() {
    let intervals = [
        interval("a", "2025-05-01", "2025-05-02"),
        interval("a", "2025-05-01", "2025-05-02"),
    ];

    assert_eq!(
        coverage_for(CountingMode::PerInterval, &intervals)[&date("2025-05-01")],
        2
    );
    assert_eq!(
        coverage_for(CountingMode::PerParticipant, &intervals)[&date("2025-05-01")],
        1
    );
}

#[test]
fn distinct_participants_ignores_repeat_submitters() {
    let intervals = [
        interval("a", "2025-05-01", "2025-05-02"),
        interval("b", "2025-05-01", "2025-05-02"),
        interval("a", "2025-06-01", "2025-06-02"),
    ];
    assert_eq!(distinct_participants(&intervals), 2);
    assert_eq!(distinct_participants(&[]), 0);
}
