#![deny(missing_docs)]

//! # Clock
//!
//! The generation timestamp is the only non-deterministic input of a compile,
//! so it is read through a trait that tests replace with a fixed instant.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current instant.
pub trait Clock {
    /// Returns the current UTC instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Parses an RFC 3339 timestamp, e.g. `2024-05-01T12:00:00Z`.
    pub fn parse(rfc3339: &str) -> AppResult<Self> {
        DateTime::parse_from_rfc3339(rfc3339)
            .map(|dt| FixedClock(dt.with_timezone(&Utc)))
            .map_err(|e| AppError::Time(format!("Invalid timestamp '{}': {}", rfc3339, e)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Renders an instant as ISO-8601 UTC with microseconds and a `Z` suffix.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}
