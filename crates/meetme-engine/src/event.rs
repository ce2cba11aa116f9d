//! Calendar events and their ingestion from Google Calendar documents.
//!
//! Google represents an all-day event with `date` bounds and a timed event with
//! `dateTime` bounds. That distinction is resolved once, here, into
//! [`EventKind`]; everything downstream compares normalized [`TimePoint`]s.

use crate::dst;
use crate::error::{EngineError, MalformedEvent, Result};
use crate::interval::TimePoint;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Clock time at which an all-day event is considered to end on its last date.
fn all_day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

/// Whether an event covers whole days or a span of clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    /// Covers `first..=last` entirely.
    AllDay { first: NaiveDate, last: NaiveDate },
    Timed,
}

/// Event transparency (busy/free status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Transparency {
    /// Blocks time on the calendar.
    #[default]
    Opaque,
    /// Shows as free; never counts as busy.
    Transparent,
}

/// A calendar entry, normalized to the reference zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub summary: String,
    pub start: TimePoint,
    pub end: TimePoint,
    pub kind: EventKind,
    pub transparency: Transparency,
}

impl Event {
    pub fn timed(summary: impl Into<String>, start: TimePoint, end: TimePoint) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
            kind: EventKind::Timed,
            transparency: Transparency::Opaque,
        }
    }

    /// An event covering every date in `first..=last`, from 00:00 of the first
    /// date to 23:59 of the last in `tz`.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidRange` if `last` precedes `first`.
    pub fn all_day(
        summary: impl Into<String>,
        first: NaiveDate,
        last: NaiveDate,
        tz: Tz,
    ) -> Result<Self> {
        if last < first {
            return Err(EngineError::InvalidRange(format!(
                "all-day event ends on {} before it starts on {}",
                last, first
            )));
        }
        Ok(Self {
            summary: summary.into(),
            start: dst::at(tz, first, NaiveTime::MIN)?,
            end: dst::at(tz, last, all_day_end())?,
            kind: EventKind::AllDay { first, last },
            transparency: Transparency::Opaque,
        })
    }

    /// Mark the event as free time.
    pub fn transparent(mut self) -> Self {
        self.transparency = Transparency::Transparent;
        self
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.kind, EventKind::AllDay { .. })
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency == Transparency::Transparent
    }
}

/// Events read from one calendar document, plus the ones that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub events: Vec<Event>,
    pub skipped: Vec<MalformedEvent>,
}

/// Accepts a bare array of events or an `events.list` response object.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventsDocument {
    List(Vec<Value>),
    Response {
        #[serde(default)]
        items: Vec<Value>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEvent {
    summary: Option<String>,
    status: Option<String>,
    transparency: Option<String>,
    start: Option<GoogleEventDateTime>,
    end: Option<GoogleEventDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventDateTime {
    date: Option<String>,
    date_time: Option<String>,
}

enum Bound {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

/// Parse a Google Calendar events document into events in `tz`.
///
/// Each item is handled on its own: an item with unparseable or missing
/// bounds lands in [`Ingested::skipped`] and the rest are still returned.
/// Cancelled items are dropped.
///
/// # Errors
/// Returns `EngineError::Json` only if the document itself is not an events
/// array or response object.
pub fn parse_events(json: &str, tz: Tz) -> Result<Ingested> {
    let items = match serde_json::from_str::<EventsDocument>(json)? {
        EventsDocument::List(items) | EventsDocument::Response { items } => items,
    };

    let mut ingested = Ingested::default();
    for (index, item) in items.into_iter().enumerate() {
        let summary = item
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_string);
        let raw: GoogleEvent = match serde_json::from_value(item) {
            Ok(raw) => raw,
            Err(e) => {
                let err = MalformedEvent::new(index, summary.as_deref(), e.to_string());
                warn!(%err, "skipping malformed event");
                ingested.skipped.push(err);
                continue;
            }
        };
        if raw.status.as_deref() == Some("cancelled") {
            debug!(index, "dropping cancelled event");
            continue;
        }
        match from_google(index, &raw, tz) {
            Ok(event) => ingested.events.push(event),
            Err(err) => {
                warn!(%err, "skipping malformed event");
                ingested.skipped.push(err);
            }
        }
    }

    debug!(
        events = ingested.events.len(),
        skipped = ingested.skipped.len(),
        "ingested calendar document"
    );
    Ok(ingested)
}

fn from_google(
    index: usize,
    raw: &GoogleEvent,
    tz: Tz,
) -> std::result::Result<Event, MalformedEvent> {
    let summary = raw.summary.clone().unwrap_or_default();
    let malformed = |reason: String| MalformedEvent::new(index, raw.summary.as_deref(), reason);

    let start = parse_bound("start", raw.start.as_ref()).map_err(malformed)?;
    let end = parse_bound("end", raw.end.as_ref()).map_err(malformed)?;

    let event = match (start, end) {
        (Bound::Date(first), Bound::Date(end_exclusive)) => {
            // Google's all-day end date is exclusive.
            let last = if end_exclusive > first {
                end_exclusive - Duration::days(1)
            } else {
                first
            };
            Event::all_day(summary, first, last, tz).map_err(|e| malformed(e.to_string()))?
        }
        (Bound::DateTime(start), Bound::DateTime(end)) => {
            if end < start {
                return Err(malformed("event ends before it starts".to_string()));
            }
            Event::timed(summary, start.with_timezone(&tz), end.with_timezone(&tz))
        }
        _ => {
            return Err(malformed(
                "event mixes an all-day bound with a timed bound".to_string(),
            ))
        }
    };

    Ok(match raw.transparency.as_deref() {
        Some("transparent") => event.transparent(),
        _ => event,
    })
}

fn parse_bound(
    which: &str,
    raw: Option<&GoogleEventDateTime>,
) -> std::result::Result<Bound, String> {
    let raw = raw.ok_or_else(|| format!("missing {}", which))?;
    if let Some(text) = &raw.date_time {
        return DateTime::parse_from_rfc3339(text)
            .map(Bound::DateTime)
            .map_err(|e| format!("unparseable {}.dateTime '{}': {}", which, text, e));
    }
    if let Some(text) = &raw.date {
        return NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Bound::Date)
            .map_err(|e| format!("unparseable {}.date '{}': {}", which, text, e));
    }
    Err(format!("{} has neither date nor dateTime", which))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn all_day_spans_midnight_to_2359() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let event = Event::all_day("Offsite", day, day, Tz::UTC).unwrap();
        assert_eq!(event.start.time(), NaiveTime::MIN);
        assert_eq!((event.end.hour(), event.end.minute()), (23, 59));
        assert_eq!(event.end.date_naive(), day);
        assert!(event.is_all_day());
    }

    #[test]
    fn all_day_with_inverted_dates_rejected() {
        let first = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let last = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert!(Event::all_day("Broken", first, last, Tz::UTC).is_err());
    }

    #[test]
    fn google_exclusive_end_date_becomes_inclusive() {
        let json = r#"[{"summary":"Trip","start":{"date":"2026-03-02"},"end":{"date":"2026-03-04"}}]"#;
        let ingested = parse_events(json, Tz::UTC).unwrap();
        assert_eq!(
            ingested.events[0].kind,
            EventKind::AllDay {
                first: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                last: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            }
        );
    }
}
