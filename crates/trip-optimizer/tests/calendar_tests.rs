//! Tests for the day-by-day calendar overlay.

use chrono::NaiveDate;
use trip_optimizer::{
    build_calendar, recommend, AvailabilityInterval, CalendarDay, DateRange, DayStatus,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn interval(who: &str, start: &str, end: &str) -> AvailabilityInterval {
    AvailabilityInterval::new(who, date(start), date(end)).unwrap()
}

fn day<'a>(calendar: &'a [CalendarDay], s: &str) -> &'a CalendarDay {
    calendar
        .iter()
        .find(|d| d.date == date(s))
        .unwrap_or_else(|| panic!("no calendar entry for {s}"))
}

#[test]
fn one_entry_per_day_of_span() {
    let span = DateRange::new(date("2025-07-01"), date("2025-07-31")).unwrap();
    let calendar = build_calendar(&[], 4, span, None);

    assert_eq!(calendar.len(), 31);
    assert_eq!(calendar[0].date, date("2025-07-01"));
    assert_eq!(calendar[30].date, date("2025-07-31"));
    assert!(calendar.iter().all(|d| d.status == DayStatus::None));
    assert!(calendar.iter().all(|d| !d.in_window));
}

#[test]
fn counts_distinct_participants_and_marks_window() {
    let intervals = vec![
        interval("john", "2025-07-15", "2025-07-25"),
        interval("jane", "2025-07-10", "2025-07-20"),
        interval("bob", "2025-07-15", "2025-07-22"),
        interval("alice", "2025-07-12", "2025-07-22"),
        // A duplicate range must not push the badge past the roster.
        interval("alice", "2025-07-17", "2025-07-18"),
    ];
    let rec = recommend(&intervals, 7, 4).unwrap();
    let span = DateRange::new(date("2025-07-01"), date("2025-07-31")).unwrap();
    let calendar = build_calendar(&intervals, 4, span, rec.window());

    let jul_09 = day(&calendar, "2025-07-09");
    assert_eq!(jul_09.available, 0);
    assert_eq!(jul_09.status, DayStatus::None);

    let jul_13 = day(&calendar, "2025-07-13");
    assert_eq!(jul_13.available, 2);
    assert_eq!(jul_13.status, DayStatus::Partial);

    let jul_17 = day(&calendar, "2025-07-17");
    assert_eq!(jul_17.available, 4);
    assert_eq!(jul_17.total, 4);
    assert_eq!(jul_17.status, DayStatus::Full);

    let in_window: Vec<NaiveDate> = calendar
        .iter()
        .filter(|d| d.in_window)
        .map(|d| d.date)
        .collect();
    assert_eq!(in_window.len(), 7);
    assert_eq!(in_window[0], date("2025-07-15"));
    assert_eq!(in_window[6], date("2025-07-21"));
}

#[test]
fn calendar_day_serializes_snake_case_status() {
    let span = DateRange::new(date("2025-07-01"), date("2025-07-01")).unwrap();
    let calendar = build_calendar(&[interval("a", "2025-07-01", "2025-07-01")], 2, span, None);
    let json = serde_json::to_value(&calendar).unwrap();

    assert_eq!(json[0]["date"], "2025-07-01");
    assert_eq!(json[0]["available"], 1);
    assert_eq!(json[0]["status"], "partial");
    assert_eq!(json[0]["in_window"], false);
}
