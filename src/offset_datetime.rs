// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date-times with a fixed offset from UTC.

use crate::date::Date;
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::instant::{Instant, TimeInstant};
use crate::offset::UtcOffset;
use crate::parse;
use crate::period::Period;
use crate::time::Time;
use crate::tz::TimeZone;
use crate::zoned::ZonedDateTime;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How [`OffsetDateTime::to_zoned`] maps onto a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OffsetConversion {
    /// Keep the instant; the local date-time may change.
    #[default]
    PreserveInstant,
    /// Keep the local date-time, preferring the current offset if the zone
    /// allows it there.
    PreserveLocalTime,
}

/// A local date-time paired with the offset it was read at.
///
/// Equality is field by field, so `10:00+01:00` and `09:00Z` are different
/// values for the same instant; use [`OffsetDateTime::is_same_instant`] to
/// compare positions on the timeline. Ordering is by instant, then by local
/// date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    date_time: DateTime,
    offset: UtcOffset,
}

impl OffsetDateTime {
    #[inline]
    pub const fn new(date_time: DateTime, offset: UtcOffset) -> OffsetDateTime {
        OffsetDateTime { date_time, offset }
    }

    pub fn from_instant(instant: Instant, offset: UtcOffset) -> Result<OffsetDateTime, Error> {
        instant.at_offset(offset)
    }

    #[inline]
    pub const fn date_time(self) -> DateTime {
        self.date_time
    }

    #[inline]
    pub const fn date(self) -> Date {
        self.date_time.date()
    }

    #[inline]
    pub const fn time(self) -> Time {
        self.date_time.time()
    }

    #[inline]
    pub const fn offset(self) -> UtcOffset {
        self.offset
    }

    pub const fn epoch_second(self) -> i64 {
        self.date_time.epoch_second_at(self.offset)
    }

    /// Fails when the local date-time at this offset lies past either end
    /// of the instant range.
    pub fn to_instant(self) -> Result<Instant, Error> {
        self.date_time.to_instant_at(self.offset)
    }

    /// Keeps the local fields and swaps the offset.
    pub fn with_offset_same_local(self, offset: UtcOffset) -> OffsetDateTime {
        OffsetDateTime::new(self.date_time, offset)
    }

    /// The same instant read at another offset.
    pub fn adjusted_to(self, offset: UtcOffset) -> Result<OffsetDateTime, Error> {
        let date_time =
            DateTime::from_epoch_second(self.epoch_second(), self.time().nanosecond(), offset)?;
        Ok(OffsetDateTime::new(date_time, offset))
    }

    pub fn to_zoned(self, zone: TimeZone, conversion: OffsetConversion) -> Result<ZonedDateTime, Error> {
        match conversion {
            OffsetConversion::PreserveInstant => ZonedDateTime::from_instant(self.to_instant()?, zone),
            OffsetConversion::PreserveLocalTime => {
                ZonedDateTime::from_local_preferring(self.date_time, zone, self.offset)
            }
        }
    }

    pub fn is_same_instant(&self, other: &OffsetDateTime) -> bool {
        self.cmp_instant(other) == Ordering::Equal
    }

    fn cmp_instant(&self, other: &OffsetDateTime) -> Ordering {
        self.epoch_second()
            .cmp(&other.epoch_second())
            .then(self.time().nanosecond().cmp(&other.time().nanosecond()))
    }

    // ── arithmetic ────────────────────────────────────────────────────

    pub fn checked_add_period(self, period: Period) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::new(self.date_time.checked_add_period(period)?, self.offset))
    }

    pub fn checked_sub_period(self, period: Period) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::new(self.date_time.checked_sub_period(period)?, self.offset))
    }

    pub fn checked_add_duration(self, duration: Duration) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::new(
            self.date_time.checked_add_duration(duration)?,
            self.offset,
        ))
    }

    pub fn checked_sub_duration(self, duration: Duration) -> Result<OffsetDateTime, Error> {
        self.checked_add_duration(duration.checked_neg()?)
    }

    /// Exact time from this value to `other` on the timeline.
    pub fn duration_until(self, other: OffsetDateTime) -> Duration {
        let secs = other.epoch_second() - self.epoch_second();
        let nanos = other.time().nanosecond() as i64 - self.time().nanosecond() as i64;
        // Both epoch seconds lie well inside i64; normalization cannot fail.
        Duration::new(secs, nanos).unwrap_or(Duration::ZERO)
    }
}

impl PartialOrd for OffsetDateTime {
    fn partial_cmp(&self, other: &OffsetDateTime) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OffsetDateTime {
    fn cmp(&self, other: &OffsetDateTime) -> Ordering {
        self.cmp_instant(other)
            .then_with(|| self.date_time.cmp(&other.date_time))
    }
}

impl TimeInstant for OffsetDateTime {
    fn difference(&self, other: &Self) -> Duration {
        other.duration_until(*self)
    }

    fn checked_add_duration(&self, duration: Duration) -> Result<Self, Error> {
        OffsetDateTime::checked_add_duration(*self, duration)
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.date_time, self.offset)
    }
}

impl FromStr for OffsetDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<OffsetDateTime, Error> {
        parse::parse_all(s, "OffsetDateTime", |c| c.offset_date_time())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for OffsetDateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> OffsetDateTime {
        use quickcheck::Arbitrary;
        let seconds = i32::arbitrary(g) % UtcOffset::MAX.total_seconds();
        // A remainder of the maximum always fits.
        let offset = UtcOffset::from_seconds(seconds).unwrap_or(UtcOffset::UTC);
        OffsetDateTime::new(DateTime::arbitrary(g), offset)
    }
}
