//! # meetme-engine
//!
//! Deterministic free-time computation for meeting scheduling.
//!
//! Given a date range, a daily clock window and one calendar's events, the
//! engine works out when that calendar is free, day by day. It performs no
//! I/O and never reads the clock; callers pass everything in, and may run
//! calendars in parallel. Intersecting several calendars is left to the
//! caller.
//!
//! ## Modules
//!
//! - [`event`]: Event model and Google Calendar ingestion
//! - [`busy`]: Select the events that are busy within a window
//! - [`freetime`]: Daily blocks, busy subtraction, per-calendar free time
//! - [`interval`]: Time points, half-open intervals, date ranges
//! - [`dst`]: Placing wall-clock times in the reference zone
//! - [`error`]: Error types

pub mod busy;
pub mod dst;
pub mod error;
pub mod event;
pub mod freetime;
pub mod interval;

pub use busy::{busy_in_range, select_busy, BusyEvent, BusySelection};
pub use dst::parse_timezone;
pub use error::{EngineError, MalformedEvent};
pub use event::{parse_events, Event, EventKind, Ingested, Transparency};
pub use freetime::{compute_free, day_blocks, subtract, FreeTime};
pub use interval::{ClockTime, DateRange, Interval, TimePoint};
