//! Time & slot utilities
//!
//! Slots are naive local date/time pairs. "Now" is supplied by a [`Clock`],
//! which knows the scheduling timezone (a fixed UTC offset) and projects the
//! current UTC instant into it, so every comparison happens in one frame.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use parking_lot::RwLock;

/// Combine a date and a time of day into the instant used for ordering
#[inline]
pub fn combine_instant(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// True iff `(date, time)` is strictly before `now`
#[inline]
pub fn is_past(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
    combine_instant(date, time) < now
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Current UTC instant, used for entity timestamps
    fn now(&self) -> DateTime<Utc>;

    /// Offset of the scheduling timezone
    fn offset(&self) -> FixedOffset;

    /// Current wall-clock time in the scheduling timezone
    fn local_now(&self) -> NaiveDateTime {
        self.now().with_timezone(&self.offset()).naive_local()
    }

    /// Current date in the scheduling timezone
    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

/// Build a fixed offset from minutes east of UTC, falling back to UTC when out of range
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(utc_offset)
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Wall clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(utc_offset())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now: RwLock::new(now),
            offset,
        }
    }

    /// Pin the clock so that local time (UTC) reads `date time`
    pub fn at_local(date: NaiveDate, time: NaiveTime) -> Self {
        Self::new(Utc.from_utc_datetime(&combine_instant(date, time)), utc_offset())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
