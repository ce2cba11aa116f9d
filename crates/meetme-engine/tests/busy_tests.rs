//! Tests for busy event selection.

use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use meetme_engine::{busy_in_range, select_busy, BusySelection, DateRange, Event, Interval, TimePoint};

fn at(day: u32, hour: u32, min: u32) -> TimePoint {
    Tz::UTC.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn clock(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

fn event(summary: &str, day: u32, start: (u32, u32), end: (u32, u32)) -> Event {
    Event::timed(summary, at(day, start.0, start.1), at(day, end.0, end.1))
}

/// 09:00-17:00 on 2026-03-02.
fn workday() -> Interval {
    Interval::new(at(2, 9, 0), at(2, 17, 0)).unwrap()
}

fn summaries(selection: &BusySelection) -> Vec<&str> {
    selection.events().iter().map(|b| b.summary.as_str()).collect()
}

#[test]
fn no_events_is_distinct_from_nothing_busy() {
    assert_eq!(select_busy(&[], &workday()), BusySelection::NoEvents);

    let evening = event("Dinner", 2, (19, 0), (21, 0));
    assert_eq!(select_busy(&[evening], &workday()), BusySelection::Empty);
}

#[test]
fn contained_event_is_busy() {
    let selection = select_busy(&[event("1:1", 2, (10, 0), (11, 0))], &workday());
    assert_eq!(summaries(&selection), vec!["1:1"]);
    assert!(selection.events()[0].selected);
}

#[test]
fn leading_and_trailing_edges_are_busy() {
    let events = vec![
        event("Late", 2, (16, 30), (18, 0)),
        event("Early", 2, (8, 0), (9, 30)),
    ];
    let selection = select_busy(&events, &workday());
    // Sorted by start, not input order.
    assert_eq!(summaries(&selection), vec!["Early", "Late"]);
}

#[test]
fn event_covering_whole_window_reported_once() {
    let selection = select_busy(&[event("Conference", 2, (8, 0), (18, 0))], &workday());
    assert_eq!(summaries(&selection), vec!["Conference"]);
}

#[test]
fn touching_events_are_not_busy() {
    let events = vec![
        event("Breakfast", 2, (8, 0), (9, 0)),
        event("Drinks", 2, (17, 0), (18, 0)),
    ];
    assert_eq!(select_busy(&events, &workday()), BusySelection::Empty);
}

#[test]
fn transparent_event_never_busy() {
    let events = vec![
        event("Focus", 2, (10, 0), (12, 0)).transparent(),
        event("Holiday", 2, (0, 0), (23, 59)).transparent(),
    ];
    assert_eq!(select_busy(&events, &workday()), BusySelection::Empty);
}

#[test]
fn zero_length_event_is_not_busy() {
    let reminder = event("Reminder", 2, (10, 0), (10, 0));
    assert_eq!(select_busy(&[reminder], &workday()), BusySelection::Empty);
}

#[test]
fn event_on_other_day_is_not_busy() {
    let tomorrow = event("Tomorrow", 3, (10, 0), (11, 0));
    assert_eq!(select_busy(&[tomorrow], &workday()), BusySelection::Empty);
}

#[test]
fn all_day_event_is_busy_and_flagged() {
    let holiday = Event::all_day("Holiday", date(2), date(2), Tz::UTC).unwrap();
    let selection = select_busy(&[holiday], &workday());
    assert_eq!(summaries(&selection), vec!["Holiday"]);
    assert!(selection.events()[0].all_day);
}

#[test]
fn overnight_event_is_busy_on_the_morning_after() {
    let red_eye = Event::timed("Red-eye", at(1, 22, 0), at(2, 10, 0));
    let selection = select_busy(&[red_eye], &workday());
    assert_eq!(summaries(&selection), vec!["Red-eye"]);
}

#[test]
fn event_ending_at_midnight_is_not_busy_next_day() {
    let late = Event::timed("Late show", at(1, 22, 0), at(2, 0, 0));
    assert_eq!(select_busy(&[late], &workday()), BusySelection::Empty);
}

#[test]
fn input_is_not_mutated() {
    let events = vec![
        event("B", 2, (13, 0), (14, 0)),
        event("A", 2, (10, 0), (11, 0)),
    ];
    let before = events.clone();
    let _ = select_busy(&events, &workday());
    assert_eq!(events, before);
}

#[test]
fn range_window_applies_daily_hours_on_every_date() {
    let events = vec![
        event("Mon", 2, (10, 0), (11, 0)),
        event("Tue night", 3, (20, 0), (21, 0)),
        event("Wed", 4, (16, 0), (17, 30)),
        event("Next week", 9, (10, 0), (11, 0)),
    ];
    let range = DateRange::new(date(2), date(4)).unwrap();
    let selection = busy_in_range(&events, &range, clock(9, 0), clock(17, 0), Tz::UTC).unwrap();
    assert_eq!(summaries(&selection), vec!["Mon", "Wed"]);
}

#[test]
fn range_window_rejects_inverted_hours() {
    let range = DateRange::new(date(2), date(4)).unwrap();
    assert!(busy_in_range(&[], &range, clock(17, 0), clock(9, 0), Tz::UTC).is_err());
}

#[test]
fn event_ending_after_fall_back_is_busy() {
    // 01:10 EDT to 01:05 EST: the end reads earlier on the clock than the start.
    let tz = Tz::America__New_York;
    let window = Interval::new(
        tz.with_ymd_and_hms(2026, 11, 1, 0, 30, 0).earliest().unwrap(),
        tz.with_ymd_and_hms(2026, 11, 1, 1, 30, 0).earliest().unwrap(),
    )
    .unwrap();
    let rerun = Event::timed(
        "Rerun",
        Tz::UTC.with_ymd_and_hms(2026, 11, 1, 5, 10, 0).unwrap().with_timezone(&tz),
        Tz::UTC.with_ymd_and_hms(2026, 11, 1, 6, 5, 0).unwrap().with_timezone(&tz),
    );
    assert_eq!(summaries(&select_busy(&[rerun], &window)), vec!["Rerun"]);
}
