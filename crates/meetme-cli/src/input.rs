//! Interpret the date range and daily hours typed by the user.
//!
//! Accepted clock forms: `9am`, `1:30pm`, `1:30 pm`, `13:30`.
//! Accepted dates: `MM/DD/YYYY` or `YYYY-MM-DD`; ranges as `A - B`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use clap::Args;
use meetme_engine::DateRange;

/// Flags selecting the dates and daily hours to search.
#[derive(Args, Debug)]
pub struct WindowArgs {
    /// Date range, e.g. "03/02/2026 - 03/06/2026"
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub range: Option<String>,
    /// First date of the range
    #[arg(long, requires = "to")]
    pub from: Option<String>,
    /// Last date of the range
    #[arg(long, requires = "from")]
    pub to: Option<String>,
    /// Start of the daily window (e.g. 9am, 13:30)
    #[arg(long, default_value = "9am")]
    pub start: String,
    /// End of the daily window
    #[arg(long, default_value = "5pm")]
    pub end: String,
    /// IANA time zone the window is expressed in
    #[arg(long, default_value = "UTC")]
    pub tz: String,
    /// Date to treat as today when no range is given (defaults to today in --tz)
    #[arg(long)]
    pub today: Option<String>,
}

/// A validated search window.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub range: DateRange,
    pub daily_start: NaiveTime,
    pub daily_end: NaiveTime,
    pub tz: Tz,
}

impl WindowArgs {
    pub fn resolve(&self) -> Result<Window> {
        let tz = meetme_engine::parse_timezone(&self.tz)?;
        let range = match (&self.range, &self.from, &self.to) {
            (Some(text), _, _) => parse_date_range(text)?,
            (None, Some(from), Some(to)) => DateRange::new(parse_date(from)?, parse_date(to)?)?,
            _ => {
                let today = match &self.today {
                    Some(text) => parse_date(text)?,
                    None => today_in(tz, Utc::now()),
                };
                DateRange::following_week(today)
            }
        };
        Ok(Window {
            range,
            daily_start: parse_clock(&self.start)?,
            daily_end: parse_clock(&self.end)?,
            tz,
        })
    }
}

/// The calendar date `now` falls on in `tz`.
fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Parse a clock time in one of the accepted forms.
pub fn parse_clock(text: &str) -> Result<NaiveTime> {
    interpret_clock(text).with_context(|| {
        format!(
            "Time '{}' didn't match accepted formats 13:30 or 1:30pm",
            text
        )
    })
}

fn interpret_clock(text: &str) -> Result<NaiveTime> {
    let lower = text.trim().to_ascii_lowercase();
    let (body, pm) = if let Some(body) = lower.strip_suffix("am") {
        (body.trim_end(), Some(false))
    } else if let Some(body) = lower.strip_suffix("pm") {
        (body.trim_end(), Some(true))
    } else {
        (lower.as_str(), None)
    };

    let (hour, minute) = match body.split_once(':') {
        Some((h, m)) => {
            if m.len() != 2 {
                bail!("minutes must have two digits");
            }
            (h.parse::<u32>()?, m.parse::<u32>()?)
        }
        // A bare hour needs am/pm.
        None if pm.is_some() => (body.parse::<u32>()?, 0),
        None => bail!("missing minutes"),
    };

    let hour = match pm {
        Some(pm) => {
            if !(1..=12).contains(&hour) {
                bail!("hour {} is not on a 12-hour clock", hour);
            }
            hour % 12 + if pm { 12 } else { 0 }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).context("time out of range")
}

/// Parse a date as `MM/DD/YYYY` or `YYYY-MM-DD`.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .with_context(|| format!("Date '{}' didn't fit expected format 12/31/2001", text))
}

/// Parse a range written as `A - B`.
pub fn parse_date_range(text: &str) -> Result<DateRange> {
    let (from, to) = text.split_once(" - ").with_context(|| {
        format!("Date range '{}' should look like 03/02/2026 - 03/06/2026", text)
    })?;
    Ok(DateRange::new(parse_date(from)?, parse_date(to)?)?)
}
