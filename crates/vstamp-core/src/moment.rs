//! Creation moments — the timestamp stamped into each note.

use std::fmt::Write;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};

use crate::error::FrontmatterError;

/// Where a [`CreationMoment`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// The filesystem recorded a true creation (birth) time.
    BirthTime,
    /// Birth time was unavailable; the last-modification time stands in.
    ModifiedFallback,
}

/// A note's creation time as local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationMoment {
    pub at: NaiveDateTime,
    pub source: TimeSource,
}

impl CreationMoment {
    #[must_use]
    pub fn new(at: NaiveDateTime, source: TimeSource) -> Self {
        Self { at, source }
    }

    /// Convert a filesystem timestamp into the local time zone.
    #[must_use]
    pub fn from_system_time(time: SystemTime, source: TimeSource) -> Self {
        let local: DateTime<Local> = time.into();
        Self {
            at: local.naive_local(),
            source,
        }
    }

    /// Render with a strftime pattern.
    ///
    /// # Errors
    ///
    /// Returns [`FrontmatterError::InvalidEncoding`] if the pattern contains
    /// an invalid specifier.
    pub fn format(&self, pattern: &str) -> Result<String, FrontmatterError> {
        let mut out = String::new();
        write!(out, "{}", self.at.format(pattern)).map_err(|_| {
            FrontmatterError::InvalidEncoding(format!("invalid timestamp format '{pattern}'"))
        })?;
        Ok(out)
    }
}
