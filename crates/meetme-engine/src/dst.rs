//! Placing wall-clock times in the reference zone, including across DST transitions.

use crate::error::{EngineError, Result};
use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
};
use chrono_tz::Tz;

/// Parse an IANA zone name (e.g. "America/Los_Angeles").
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` if the name is not a known zone.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

/// Resolve a local wall-clock datetime in `tz`.
///
/// A repeated time (fall back) takes its earlier instant. A skipped time
/// (spring forward) is read with the offset in force before the gap, which
/// shifts it forward by the length of the gap. A zone that skips a whole
/// date lands the time on the following date.
///
/// # Errors
/// Returns `EngineError::NonexistentLocalTime` if no instant can be found.
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            let before = tz
                .offset_from_local_datetime(&(local - Duration::days(1)))
                .earliest()
                .ok_or_else(|| {
                    EngineError::NonexistentLocalTime(format!("{} in {}", local, tz))
                })?;
            let utc = local - Duration::seconds(i64::from(before.fix().local_minus_utc()));
            Ok(tz.from_utc_datetime(&utc))
        }
    }
}

/// Resolve `date` at clock time `time` in `tz`.
pub fn at(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>> {
    resolve_local(tz, date.and_time(time))
}
