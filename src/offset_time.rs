// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Times of day read at a fixed UTC offset.

use crate::calendar::NANOS_PER_SECOND;
use crate::duration::Duration;
use crate::error::Error;
use crate::offset::UtcOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::parse;
use crate::time::Time;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A time of day and the offset it was read at, without a date.
///
/// Ordering is by position within the UTC day, then by local time, so two
/// values describing the same moment at different offsets are ordered but
/// not equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    time: Time,
    offset: UtcOffset,
}

impl OffsetTime {
    /// Midnight at the largest offset, the earliest point of any UTC day.
    pub const MIN: OffsetTime = OffsetTime::new(Time::MIDNIGHT, UtcOffset::MAX);
    /// The last nanosecond of the day at the smallest offset.
    pub const MAX: OffsetTime = OffsetTime::new(Time::MAX, UtcOffset::MIN);

    #[inline]
    pub const fn new(time: Time, offset: UtcOffset) -> OffsetTime {
        OffsetTime { time, offset }
    }

    #[inline]
    pub const fn time(self) -> Time {
        self.time
    }

    #[inline]
    pub const fn offset(self) -> UtcOffset {
        self.offset
    }

    #[inline]
    pub const fn hour(self) -> u8 {
        self.time.hour()
    }

    #[inline]
    pub const fn minute(self) -> u8 {
        self.time.minute()
    }

    #[inline]
    pub const fn second(self) -> u8 {
        self.time.second()
    }

    #[inline]
    pub const fn nanosecond(self) -> u32 {
        self.time.nanosecond()
    }

    /// Nanoseconds since the start of the UTC day, which may fall outside
    /// `0..86_400 * 10^9` when the offset moves the time across midnight.
    pub const fn nanosecond_of_utc_day(self) -> i64 {
        self.time.nanosecond_of_day() - self.offset.total_seconds() as i64 * NANOS_PER_SECOND
    }

    pub fn with_time(self, time: Time) -> OffsetTime {
        OffsetTime::new(time, self.offset)
    }

    /// The same local time at another offset.
    pub fn with_offset_same_local(self, offset: UtcOffset) -> OffsetTime {
        OffsetTime::new(self.time, offset)
    }

    /// The same moment read at `offset`, wrapping around midnight.
    pub fn adjusted_to(self, offset: UtcOffset) -> OffsetTime {
        if offset == self.offset {
            return self;
        }
        let shift = offset.total_seconds() as i64 - self.offset.total_seconds() as i64;
        let (time, _) = self.time.wrapping_add(Duration::of_seconds(shift));
        OffsetTime::new(time, offset)
    }

    /// Adds a duration to the local time, wrapping around midnight.
    pub fn wrapping_add(self, duration: Duration) -> OffsetTime {
        self.with_time(self.time.wrapping_add(duration).0)
    }

    /// Whether both values name the same moment of the UTC day.
    pub fn is_same_instant(&self, other: &OffsetTime) -> bool {
        self.nanosecond_of_utc_day() == other.nanosecond_of_utc_day()
    }
}

impl PartialOrd for OffsetTime {
    fn partial_cmp(&self, other: &OffsetTime) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OffsetTime {
    fn cmp(&self, other: &OffsetTime) -> Ordering {
        self.nanosecond_of_utc_day()
            .cmp(&other.nanosecond_of_utc_day())
            .then(self.time.cmp(&other.time))
    }
}

impl Time {
    /// This time read at `offset`.
    #[inline]
    pub const fn at_offset(self, offset: UtcOffset) -> OffsetTime {
        OffsetTime::new(self, offset)
    }
}

impl OffsetDateTime {
    /// Drops the date.
    pub const fn to_offset_time(self) -> OffsetTime {
        OffsetTime::new(self.time(), self.offset())
    }
}

impl fmt::Display for OffsetTime {
    /// `10:15:30+01:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time, self.offset)
    }
}

impl FromStr for OffsetTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<OffsetTime, Error> {
        parse::parse_all(s, "OffsetTime", |c| {
            let time = c.time()?;
            Ok(OffsetTime::new(time, c.offset()?))
        })
    }
}
