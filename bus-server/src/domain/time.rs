//! Wall-clock time handling for the timetable.
//!
//! Departure times arrive as "HH:MM" strings. This module provides a
//! minutes-since-midnight representation computed once at parse time,
//! so all comparisons and arithmetic in the planner are integer math.

use std::fmt;

use chrono::{NaiveTime, Timelike};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day as minutes since midnight (0-1439).
///
/// # Examples
///
/// ```
/// use bus_server::domain::DayTime;
///
/// let t = DayTime::parse("08:15").unwrap();
/// assert_eq!(t.minutes(), 8 * 60 + 15);
/// assert_eq!(t.to_string(), "08:15");
///
/// // Invalid formats are rejected
/// assert!(DayTime::parse("0815").is_err());
/// assert!(DayTime::parse("25:00").is_err());
/// assert!(DayTime::parse("08:15:30").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayTime {
    minutes: u16,
}

impl DayTime {
    /// Create a DayTime from minutes since midnight.
    ///
    /// Returns `None` if `minutes` is 1440 or more.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < 24 * 60 {
            Some(Self { minutes })
        } else {
            None
        }
    }

    /// Parse a time from "HH:MM" format (24-hour clock).
    ///
    /// A single-digit hour ("9:30") is accepted; trailing content
    /// ("08:15:30") is not.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TimeError::new("empty time string"));
        }

        let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map_err(|_| TimeError::new("expected HH:MM"))?;

        Ok(Self {
            minutes: (time.hour() * 60 + time.minute()) as u16,
        })
    }

    /// Parse an optional "depart after" filter.
    ///
    /// Empty input means no filter. A non-empty value that does not parse
    /// is also treated as no filter, never as an error.
    pub fn parse_filter(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// Minutes since midnight (0-1439).
    pub fn minutes(&self) -> u16 {
        self.minutes
    }

    /// The hour component (0-23).
    pub fn hour(&self) -> u16 {
        self.minutes / 60
    }

    /// The minute component (0-59).
    pub fn minute(&self) -> u16 {
        self.minutes % 60
    }
}

impl fmt::Debug for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DayTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
