//! Slot - a `(date, time)` pair identifying a bookable or booked instant
//!
//! Slots compare structurally: two slots are the same slot iff date and time
//! are equal. Durations never take part in slot identity. The derived `Ord`
//! (date first, then time) is the chronological order of slot instants.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors when parsing a slot from its wire form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotParseError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
}

/// A calendar date plus a time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
}

impl Slot {
    /// Create a new slot
    pub const fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Parse a slot from `YYYY-MM-DD` and `HH:MM` strings
    pub fn parse(date: &str, time: &str) -> Result<Self, SlotParseError> {
        let parsed_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| SlotParseError::InvalidDate(date.to_string()))?;
        Ok(Self::new(parsed_date, parse_time(time)?))
    }

    /// The local instant this slot starts at
    #[inline]
    pub fn instant(&self) -> NaiveDateTime {
        crate::time::combine_instant(self.date, self.time)
    }

    /// True iff the slot starts strictly before `now`
    #[inline]
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        crate::time::is_past(self.date, self.time, now)
    }

    /// True if the slot falls on a Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.time.format("%H:%M"))
    }
}

/// Parse a time of day, accepting `HH:MM` and `HH:MM:SS`
pub fn parse_time(s: &str) -> Result<NaiveTime, SlotParseError> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| SlotParseError::InvalidTime(s.to_string()))
}

/// Serde adapter writing times of day as `HH:MM`
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
