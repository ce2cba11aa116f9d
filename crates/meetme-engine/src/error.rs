//! Error types for meetme-engine operations.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Nonexistent local time: {0}")]
    NonexistentLocalTime(String),

    #[error(transparent)]
    MalformedEvent(#[from] MalformedEvent),

    #[error("Calendar document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single event that could not be normalized.
///
/// These are collected into reports next to the results instead of aborting
/// the whole calendar.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("event #{index} ({}): {reason}", .summary.as_deref().unwrap_or("untitled"))]
pub struct MalformedEvent {
    /// Position of the event in the input sequence.
    pub index: usize,
    pub summary: Option<String>,
    pub reason: String,
}

impl MalformedEvent {
    pub fn new(index: usize, summary: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            index,
            summary: summary.map(str::to_string),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
