//! Meeting time model.
//!
//! A meeting time is a weekly recurring period (day + start minute) at
//! which a section meets. Periods have a uniform default length of
//! [`DEFAULT_PERIOD_MINUTES`], overridable per meeting time.
//!
//! # Overlap
//! Two meeting times overlap iff they fall on the same day and their
//! half-open intervals `[start, start + duration)` intersect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default period length (minutes).
pub const DEFAULT_PERIOD_MINUTES: u32 = 60;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday through Friday.
    pub const WEEKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Three-letter label ("Mon", "Tue", ...).
    pub fn short_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A weekly meeting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTime {
    /// Unique meeting time identifier.
    pub id: String,
    /// Human-readable label.
    pub name: String,
    /// Day of the week.
    pub day: Weekday,
    /// Start, in minutes from midnight.
    pub start_minute: u32,
    /// Length of the period (minutes).
    pub duration_minutes: u32,
}

impl MeetingTime {
    /// Creates a meeting time of default length.
    pub fn new(id: impl Into<String>, day: Weekday, start_minute: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            day,
            start_minute,
            duration_minutes: DEFAULT_PERIOD_MINUTES,
        }
    }

    /// Creates a meeting time starting on the hour.
    ///
    /// Hours past the end of the day saturate; validation rejects them.
    pub fn at_hour(id: impl Into<String>, day: Weekday, hour: u32) -> Self {
        Self::new(id, day, hour.saturating_mul(60))
    }

    /// Sets the label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the period length.
    pub fn with_duration(mut self, duration_minutes: u32) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    /// End of the period (exclusive), in minutes from midnight.
    #[inline]
    pub fn end_minute(&self) -> u32 {
        self.start_minute.saturating_add(self.duration_minutes)
    }

    /// Whether two meeting times overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_minute < other.end_minute()
            && other.start_minute < self.end_minute()
    }
}

impl fmt::Display for MeetingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}",
            self.day,
            self.start_minute / 60,
            self.start_minute % 60
        )
    }
}
