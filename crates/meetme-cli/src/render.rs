//! Text and JSON output for free and busy listings.

use meetme_engine::{BusyEvent, BusySelection, Interval, MalformedEvent, TimePoint};
use serde::Serialize;

/// One calendar's free slots, as reported.
#[derive(Debug, Serialize)]
pub struct CalendarFree {
    pub id: String,
    pub free: Vec<Interval>,
    pub skipped: Vec<MalformedEvent>,
}

/// One calendar's busy events, as reported.
#[derive(Debug, Serialize)]
pub struct CalendarBusy {
    pub id: String,
    pub busy: BusySelection,
    pub skipped: Vec<MalformedEvent>,
}

#[derive(Debug, Serialize)]
pub struct FreeReport {
    pub calendars: Vec<CalendarFree>,
    pub common: Vec<Interval>,
}

#[derive(Debug, Serialize)]
pub struct BusyReport {
    pub calendars: Vec<CalendarBusy>,
}

fn fmt_date(t: &TimePoint) -> String {
    t.format("%a %m/%d/%Y").to_string()
}

fn fmt_time(t: &TimePoint) -> String {
    t.format("%H:%M").to_string()
}

fn slot_line(slot: &Interval) -> String {
    format!(
        "  {} {} - {}",
        fmt_date(&slot.start()),
        fmt_time(&slot.start()),
        fmt_time(&slot.end())
    )
}

fn busy_line(event: &BusyEvent) -> String {
    if event.all_day {
        if event.start.date_naive() == event.end.date_naive() {
            format!("  {} (all day) {}", fmt_date(&event.start), event.summary)
        } else {
            format!(
                "  {} - {} (all day) {}",
                fmt_date(&event.start),
                fmt_date(&event.end),
                event.summary
            )
        }
    } else if event.start.date_naive() == event.end.date_naive() {
        format!(
            "  {} {} - {} {}",
            fmt_date(&event.start),
            fmt_time(&event.start),
            fmt_time(&event.end),
            event.summary
        )
    } else {
        format!(
            "  {} {} - {} {} {}",
            fmt_date(&event.start),
            fmt_time(&event.start),
            fmt_date(&event.end),
            fmt_time(&event.end),
            event.summary
        )
    }
}

fn slot_block(slots: &[Interval]) -> String {
    if slots.is_empty() {
        return "  (none)\n".to_string();
    }
    slots
        .iter()
        .map(|slot| format!("{}\n", slot_line(slot)))
        .collect()
}

pub fn free_text(report: &FreeReport) -> String {
    let mut out = String::new();
    for calendar in &report.calendars {
        out.push_str(&format!("Free times for {}:\n", calendar.id));
        out.push_str(&slot_block(&calendar.free));
    }
    out.push_str("Common free times:\n");
    out.push_str(&slot_block(&report.common));
    out
}

pub fn busy_text(report: &BusyReport) -> String {
    let mut out = String::new();
    for calendar in &report.calendars {
        out.push_str(&format!("Busy times for {}:\n", calendar.id));
        match &calendar.busy {
            BusySelection::NoEvents => out.push_str("  No events.\n"),
            BusySelection::Empty => out.push_str("  (none)\n"),
            BusySelection::Events(events) => {
                for event in events {
                    out.push_str(&format!("{}\n", busy_line(event)));
                }
            }
        }
    }
    out
}

/// Skipped-event warnings, one line per event.
pub fn skipped_text(id: &str, skipped: &[MalformedEvent]) -> String {
    skipped
        .iter()
        .map(|err| format!("warning: {}: skipped {}\n", id, err))
        .collect()
}
