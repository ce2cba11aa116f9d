//! Select the events that make a calendar busy within a window.
//!
//! A window is read as a band: the dates from its start date to its end date,
//! each crossed with the clock times from its start time to its end time. An
//! event is projected onto every window date it touches and classified by
//! comparing times of day.

use crate::dst;
use crate::error::Result;
use crate::event::Event;
use crate::interval::{validate_daily, ClockTime, DateRange, Interval, TimePoint};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::Serialize;

/// An event selected as busy, annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusyEvent {
    pub summary: String,
    pub start: TimePoint,
    pub end: TimePoint,
    pub all_day: bool,
    pub selected: bool,
}

/// Outcome of [`select_busy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BusySelection {
    /// The calendar had no events at all.
    NoEvents,
    /// There were events, but none is busy within the window.
    Empty,
    /// Busy events, ordered by start.
    Events(Vec<BusyEvent>),
}

impl BusySelection {
    pub fn events(&self) -> &[BusyEvent] {
        match self {
            BusySelection::Events(events) => events,
            BusySelection::NoEvents | BusySelection::Empty => &[],
        }
    }
}

/// Last representable instant of a day, for events that run past midnight.
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
}

/// The event's clock span on `day`, or `None` if it does not touch `day`.
fn project(event: &Event, day: NaiveDate) -> Option<(NaiveTime, NaiveTime)> {
    let (start_day, end_day) = (event.start.date_naive(), event.end.date_naive());
    if day < start_day || day > end_day {
        return None;
    }
    let from = if start_day < day {
        NaiveTime::MIN
    } else {
        event.start.time()
    };
    let to = if end_day > day {
        end_of_day()
    } else {
        event.end.time()
    };
    (from < to).then_some((from, to))
}

/// The window's instants on `day`, or `None` if they cannot be placed.
fn band(window: &Interval, day: NaiveDate) -> Option<(TimePoint, TimePoint)> {
    let tz = window.start().timezone();
    let start = if day == window.start().date_naive() {
        window.start()
    } else {
        dst::at(tz, day, window.start().time()).ok()?
    };
    let end = if day == window.end().date_naive() {
        window.end()
    } else {
        dst::at(tz, day, window.end().time()).ok()?
    };
    Some((start, end))
}

fn is_busy(event: &Event, window: &Interval) -> bool {
    if event.is_transparent() || event.start >= event.end {
        return false;
    }
    let (ws, we) = (window.start().time(), window.end().time());
    let first = window.start().date_naive().max(event.start.date_naive());
    let last = window.end().date_naive().min(event.end.date_naive());

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .any(|day| {
            let by_clock = project(event, day).is_some_and(|(ts, te)| {
                let contained = ts >= ws && te <= we;
                let leading_edge = ts < ws && te > ws;
                let trailing_edge = ts < we && te > we;
                contained || leading_edge || trailing_edge
            });
            // Clock times repeat on a fall-back day; real instants settle it.
            by_clock
                || band(window, day).is_some_and(|(start, end)| {
                    event.start < end && event.end > start
                })
        })
}

/// Select the events that count as busy within `window`.
///
/// Transparent and zero-length events never count. An event is busy if, on
/// some window date, its clock span lies inside the window's clock span or
/// crosses its start or end. Ends are exclusive: an event that ends exactly
/// when the window starts, or starts exactly when it ends, is not busy.
pub fn select_busy(events: &[Event], window: &Interval) -> BusySelection {
    if events.is_empty() {
        return BusySelection::NoEvents;
    }

    let mut busy: Vec<BusyEvent> = events
        .iter()
        .filter(|event| is_busy(event, window))
        .map(|event| BusyEvent {
            summary: event.summary.clone(),
            start: event.start,
            end: event.end,
            all_day: event.is_all_day(),
            selected: true,
        })
        .collect();

    if busy.is_empty() {
        return BusySelection::Empty;
    }
    busy.sort_by_key(|b| (b.start, b.end));
    BusySelection::Events(busy)
}

/// Busy events over a whole date range, using the window from
/// `daily_start` on the first date to `daily_end` on the last.
///
/// # Errors
/// Returns `EngineError::InvalidRange` for an inverted date range or daily
/// window.
pub fn busy_in_range(
    events: &[Event],
    range: &DateRange,
    daily_start: ClockTime,
    daily_end: ClockTime,
    tz: Tz,
) -> Result<BusySelection> {
    range.validate()?;
    validate_daily(daily_start, daily_end)?;
    let window = Interval::new(
        dst::at(tz, range.start, daily_start)?,
        dst::at(tz, range.end, daily_end)?,
    )?;
    Ok(select_busy(events, &window))
}
