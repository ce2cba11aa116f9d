//! `meetme` CLI: find meeting times across exported Google Calendar event lists.
//!
//! ## Usage
//!
//! ```sh
//! # Free times for each calendar and the times everyone shares
//! meetme free alice.json bob.json --range "03/02/2026 - 03/06/2026" --start 9am --end 5pm
//!
//! # Only slots long enough for an hour-long meeting, in a given zone, as JSON
//! meetme free alice.json bob.json --from 2026-03-02 --to 2026-03-06 \
//!     --tz America/Los_Angeles --min-minutes 60 --json
//!
//! # Busy events within the window
//! meetme busy alice.json --range "03/02/2026 - 03/06/2026"
//!
//! # Without a range, searches tomorrow through a week from today
//! meetme free alice.json
//! ```
//!
//! Each calendar file holds a Google Calendar `events.list` response or a bare
//! array of events; the calendar is named after the file stem.

mod common;
mod input;
mod render;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use input::{Window, WindowArgs};
use meetme_engine::{busy_in_range, compute_free, Ingested};
use render::{BusyReport, CalendarBusy, CalendarFree, FreeReport};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "meetme",
    version,
    about = "Find meeting times across Google Calendar event lists"
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show free times per calendar and the times common to all
    Free {
        /// Calendar event files (JSON)
        #[arg(required = true)]
        calendars: Vec<PathBuf>,
        #[command(flatten)]
        window: WindowArgs,
        /// Only show slots at least this many minutes long
        #[arg(long, default_value_t = 0)]
        min_minutes: i64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the busy events of each calendar within the window
    Busy {
        /// Calendar event files (JSON)
        #[arg(required = true)]
        calendars: Vec<PathBuf>,
        #[command(flatten)]
        window: WindowArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// A calendar read from disk.
struct Calendar {
    id: String,
    ingested: Ingested,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Free {
            calendars,
            window,
            min_minutes,
            json,
        } => {
            let window = window.resolve()?;
            let calendars = load_calendars(&calendars, &window)?;
            let report = free_report(&calendars, &window, min_minutes)?;
            for calendar in &report.calendars {
                eprint!("{}", render::skipped_text(&calendar.id, &calendar.skipped));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::free_text(&report));
            }
        }
        Commands::Busy {
            calendars,
            window,
            json,
        } => {
            let window = window.resolve()?;
            let calendars = load_calendars(&calendars, &window)?;
            let report = busy_report(calendars, &window)?;
            for calendar in &report.calendars {
                eprint!("{}", render::skipped_text(&calendar.id, &calendar.skipped));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::busy_text(&report));
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_calendars(paths: &[PathBuf], window: &Window) -> Result<Vec<Calendar>> {
    paths
        .iter()
        .map(|path| {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let ingested = meetme_engine::parse_events(&json, window.tz)
                .with_context(|| format!("Failed to parse calendar: {}", path.display()))?;
            let id = calendar_id(path);
            info!(calendar = %id, events = ingested.events.len(), "loaded calendar");
            Ok(Calendar { id, ingested })
        })
        .collect()
}

fn calendar_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn free_report(calendars: &[Calendar], window: &Window, min_minutes: i64) -> Result<FreeReport> {
    let mut reported = Vec::with_capacity(calendars.len());
    let mut all_slots = Vec::with_capacity(calendars.len());

    for calendar in calendars {
        let free = compute_free(
            &window.range,
            window.daily_start,
            window.daily_end,
            window.tz,
            &calendar.ingested.events,
        )
        .with_context(|| format!("Failed to compute free time for {}", calendar.id))?;

        let mut skipped = calendar.ingested.skipped.clone();
        skipped.extend(free.skipped.iter().cloned());
        all_slots.push(free.slots.clone());
        reported.push(CalendarFree {
            id: calendar.id.clone(),
            free: free.at_least(min_minutes),
            skipped,
        });
    }

    let common = common::common_free(&all_slots)
        .into_iter()
        .filter(|slot| slot.duration_minutes() >= min_minutes)
        .collect();

    Ok(FreeReport {
        calendars: reported,
        common,
    })
}

fn busy_report(calendars: Vec<Calendar>, window: &Window) -> Result<BusyReport> {
    let calendars = calendars
        .into_iter()
        .map(|calendar| {
            let busy = busy_in_range(
                &calendar.ingested.events,
                &window.range,
                window.daily_start,
                window.daily_end,
                window.tz,
            )
            .with_context(|| format!("Failed to select busy events for {}", calendar.id))?;
            Ok(CalendarBusy {
                id: calendar.id,
                busy,
                skipped: calendar.ingested.skipped,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(BusyReport { calendars })
}
