//! Compute a calendar's free time, one daily block at a time.
//!
//! Each date in the range gets a candidate block at the daily clock window.
//! The busy events of that block are clipped to it, and the gaps between
//! them are the free intervals.

use crate::busy::{select_busy, BusyEvent, BusySelection};
use crate::dst;
use crate::error::{MalformedEvent, Result};
use crate::event::Event;
use crate::interval::{validate_daily, ClockTime, DateRange, Interval, TimePoint};
use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, warn};

/// One calendar's free time over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeTime {
    /// Free intervals in chronological order.
    pub slots: Vec<Interval>,
    /// Events that were ignored because they could not be normalized.
    pub skipped: Vec<MalformedEvent>,
}

impl FreeTime {
    /// Slots lasting at least `min_minutes`.
    pub fn at_least(&self, min_minutes: i64) -> Vec<Interval> {
        self.slots
            .iter()
            .filter(|slot| slot.duration_minutes() >= min_minutes)
            .copied()
            .collect()
    }

    /// The earliest slot lasting at least `min_minutes`.
    pub fn first_fit(&self, min_minutes: i64) -> Option<Interval> {
        self.slots
            .iter()
            .find(|slot| slot.duration_minutes() >= min_minutes)
            .copied()
    }
}

/// One candidate block per date in `range`, from `daily_start` to `daily_end`.
///
/// A date the zone skips entirely, or whose bounds cannot be placed, gets no
/// block.
///
/// # Errors
/// Returns `EngineError::InvalidRange` if the range or daily window is
/// inverted.
pub fn day_blocks(
    range: &DateRange,
    daily_start: ClockTime,
    daily_end: ClockTime,
    tz: Tz,
) -> Result<Vec<Interval>> {
    range.validate()?;
    validate_daily(daily_start, daily_end)?;

    let mut blocks = Vec::new();
    for day in range.days() {
        let bounds = (dst::at(tz, day, daily_start), dst::at(tz, day, daily_end));
        let (start, end) = match bounds {
            (Ok(start), Ok(end)) => (start, end),
            (Err(err), _) | (_, Err(err)) => {
                warn!(%day, %err, "skipping date that cannot be placed in zone");
                continue;
            }
        };
        if start.date_naive() != day {
            debug!(%day, %tz, "skipping date missing from zone");
            continue;
        }
        // A gap near midnight can carry the end into the next date.
        let end = match day.succ_opt().map(|next| dst::at(tz, next, NaiveTime::MIN)) {
            Some(Ok(midnight)) if end > midnight => midnight,
            _ => end,
        };
        // A DST shift can push the start past an end inside the same gap.
        blocks.push(Interval::new(start, end.max(start))?);
    }
    Ok(blocks)
}

/// Clip busy spans to the block, sorted by (start, end).
fn clipped_busy(block: &Interval, busy: &[BusyEvent]) -> Vec<(TimePoint, TimePoint)> {
    let mut spans: Vec<(TimePoint, TimePoint)> = busy
        .iter()
        .filter(|b| b.start < block.end() && b.end > block.start())
        .map(|b| (b.start.max(block.start()), b.end.min(block.end())))
        .collect();
    spans.sort_by_key(|&(start, end)| (start, end));
    spans
}

/// The parts of `block` not covered by any busy event.
///
/// Busy events may overlap or touch; the gaps between them are returned in
/// order, and zero-length gaps are dropped.
pub fn subtract(block: &Interval, busy: &[BusyEvent]) -> Vec<Interval> {
    let mut free = Vec::new();
    let mut cursor = block.start();

    for (busy_start, busy_end) in clipped_busy(block, busy) {
        if cursor < busy_start {
            free.extend(Interval::new(cursor, busy_start).ok());
        }
        cursor = cursor.max(busy_end);
    }

    // Trailing free slot after the last busy period.
    if cursor < block.end() {
        free.extend(Interval::new(cursor, block.end()).ok());
    }

    free
}

/// Compute the free intervals of one calendar over `range`, within the daily
/// window from `daily_start` to `daily_end` in `tz`.
///
/// Events that end before they start are skipped and reported in
/// [`FreeTime::skipped`]; the rest of the calendar is still processed.
///
/// # Errors
/// Returns `EngineError::InvalidRange` if the range or daily window is
/// inverted.
pub fn compute_free(
    range: &DateRange,
    daily_start: ClockTime,
    daily_end: ClockTime,
    tz: Tz,
    events: &[Event],
) -> Result<FreeTime> {
    let blocks = day_blocks(range, daily_start, daily_end, tz)?;

    let mut skipped = Vec::new();
    let mut valid = Vec::with_capacity(events.len());
    for (index, event) in events.iter().enumerate() {
        if event.end < event.start {
            let err = MalformedEvent::new(
                index,
                Some(event.summary.as_str()),
                "event ends before it starts",
            );
            warn!(%err, "skipping malformed event");
            skipped.push(err);
        } else {
            valid.push(event.clone());
        }
    }

    let mut slots = Vec::new();
    for block in &blocks {
        if block.is_empty() {
            continue;
        }
        let selection = select_busy(&valid, block);
        let before = slots.len();
        match &selection {
            BusySelection::NoEvents | BusySelection::Empty => slots.push(*block),
            BusySelection::Events(busy) => slots.extend(subtract(block, busy)),
        }
        debug!(
            day = %block.start().date_naive(),
            busy = selection.events().len(),
            free = slots.len() - before,
            "computed free time for block"
        );
    }

    Ok(FreeTime { slots, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn tp(h: u32, m: u32) -> TimePoint {
        Tz::UTC.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn busy(sh: u32, sm: u32, eh: u32, em: u32) -> BusyEvent {
        BusyEvent {
            summary: "busy".to_string(),
            start: tp(sh, sm),
            end: tp(eh, em),
            all_day: false,
            selected: true,
        }
    }

    #[test]
    fn back_to_back_busy_leaves_no_sliver() {
        let block = Interval::new(tp(9, 0), tp(17, 0)).unwrap();
        let free = subtract(&block, &[busy(10, 0, 11, 0), busy(11, 0, 12, 0)]);
        assert_eq!(free.len(), 2);
        assert_eq!(free[0].end(), tp(10, 0));
        assert_eq!(free[1].start(), tp(12, 0));
    }

    #[test]
    fn nested_busy_does_not_rewind_cursor() {
        let block = Interval::new(tp(9, 0), tp(17, 0)).unwrap();
        let free = subtract(&block, &[busy(10, 0, 14, 0), busy(11, 0, 12, 0)]);
        assert_eq!(free.len(), 2);
        assert_eq!(free[1].start(), tp(14, 0));
    }

    #[test]
    fn unsorted_busy_is_handled() {
        let block = Interval::new(tp(9, 0), tp(17, 0)).unwrap();
        let free = subtract(&block, &[busy(15, 0, 16, 0), busy(10, 0, 11, 0)]);
        let starts: Vec<_> = free.iter().map(|s| s.start()).collect();
        assert_eq!(starts, vec![tp(9, 0), tp(11, 0), tp(16, 0)]);
    }

    #[test]
    fn equal_daily_bounds_yield_nothing() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let range = DateRange::new(day, day).unwrap();
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let free = compute_free(&range, nine, nine, Tz::UTC, &[]).unwrap();
        assert!(free.slots.is_empty());
    }
}
