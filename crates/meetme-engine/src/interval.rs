//! Time points, half-open intervals, and inclusive date ranges.

use crate::error::{EngineError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::Serialize;

/// An instant in the reference zone.
pub type TimePoint = DateTime<Tz>;

/// A wall-clock time of day.
pub type ClockTime = NaiveTime;

/// A half-open `[start, end)` span of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    start: TimePoint,
    end: TimePoint,
}

impl Interval {
    /// # Errors
    /// Returns `EngineError::InvalidRange` if `start > end`.
    pub fn new(start: TimePoint, end: TimePoint) -> Result<Self> {
        if start > end {
            return Err(EngineError::InvalidRange(format!(
                "interval starts at {} after it ends at {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimePoint {
        self.start
    }

    pub fn end(&self) -> TimePoint {
        self.end
    }

    /// Zero-length intervals are degenerate and hold no time.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open overlap: intervals that only touch do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Check that a daily clock window does not end before it starts.
pub(crate) fn validate_daily(daily_start: ClockTime, daily_end: ClockTime) -> Result<()> {
    if daily_start > daily_end {
        return Err(EngineError::InvalidRange(format!(
            "daily window starts at {} after it ends at {}",
            daily_start.format("%H:%M"),
            daily_end.format("%H:%M")
        )));
    }
    Ok(())
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// # Errors
    /// Returns `EngineError::InvalidRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Tomorrow through one week from `today`.
    pub fn following_week(today: NaiveDate) -> Self {
        Self {
            start: today + Duration::days(1),
            end: today + Duration::days(7),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(EngineError::InvalidRange(format!(
                "date range starts on {} after it ends on {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Every date in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}
