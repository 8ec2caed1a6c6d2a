// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Local date-times without a zone or offset.

use crate::calendar::{NANOS_PER_SECOND, SECONDS_PER_DAY};
use crate::date::Date;
use crate::duration::Duration;
use crate::error::Error;
use crate::instant::Instant;
use crate::math;
use crate::offset::UtcOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::parse;
use crate::period::Period;
use crate::time::Time;
use std::fmt;
use std::str::FromStr;

/// A date and a time of day, as read from a wall calendar and clock.
///
/// A `DateTime` does not identify an instant until it is combined with an
/// offset or a time zone. Ordering is by date, then by time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    pub const MIN: DateTime = DateTime::new(Date::MIN, Time::MIDNIGHT);
    pub const MAX: DateTime = DateTime::new(Date::MAX, Time::MAX);

    #[inline]
    pub const fn new(date: Date, time: Time) -> DateTime {
        DateTime { date, time }
    }

    /// Builds a date-time at whole seconds from numeric components.
    pub fn from_ymd_hms(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<DateTime, Error> {
        Ok(DateTime::new(
            Date::new(year, month, day)?,
            Time::from_hms(hour, minute, second)?,
        ))
    }

    /// The local date-time at `offset` for an epoch second and nanosecond.
    pub fn from_epoch_second(
        epoch_second: i64,
        nanosecond: u32,
        offset: UtcOffset,
    ) -> Result<DateTime, Error> {
        let local = math::plus_exact(epoch_second, offset.total_seconds() as i64)?;
        let date = Date::from_epoch_day(math::floor_div(local, SECONDS_PER_DAY))?;
        let second_of_day = math::floor_mod(local, SECONDS_PER_DAY);
        let time = Time::from_nanosecond_of_day(
            second_of_day * NANOS_PER_SECOND + math::check_nanosecond(nanosecond as i64)? as i64,
        )?;
        Ok(DateTime::new(date, time))
    }

    #[inline]
    pub const fn date(self) -> Date {
        self.date
    }

    #[inline]
    pub const fn time(self) -> Time {
        self.time
    }

    pub fn with_date(self, date: Date) -> DateTime {
        DateTime::new(date, self.time)
    }

    pub fn with_time(self, time: Time) -> DateTime {
        DateTime::new(self.date, time)
    }

    /// Seconds since 1970-01-01T00:00Z when read at `offset`.
    ///
    /// Every supported date-time fits in an `i64` count of seconds.
    pub const fn epoch_second_at(self, offset: UtcOffset) -> i64 {
        self.date.epoch_day() * SECONDS_PER_DAY + self.time.second_of_day()
            - offset.total_seconds() as i64
    }

    /// The instant this date-time denotes at `offset`.
    pub fn to_instant_at(self, offset: UtcOffset) -> Result<Instant, Error> {
        Instant::from_epoch_second(self.epoch_second_at(offset), self.time.nanosecond() as i64)
    }

    /// Attaches an offset without changing the local fields.
    #[inline]
    pub const fn at_offset(self, offset: UtcOffset) -> OffsetDateTime {
        OffsetDateTime::new(self, offset)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Adds a period to the date, keeping the time of day.
    pub fn checked_add_period(self, period: Period) -> Result<DateTime, Error> {
        Ok(DateTime::new(self.date.checked_add_period(period)?, self.time))
    }

    pub fn checked_sub_period(self, period: Period) -> Result<DateTime, Error> {
        Ok(DateTime::new(self.date.checked_sub_period(period)?, self.time))
    }

    /// Adds an exact duration, carrying across midnight.
    pub fn checked_add_duration(self, duration: Duration) -> Result<DateTime, Error> {
        let (time, carry) = self.time.wrapping_add(duration);
        Ok(DateTime::new(self.date.checked_add_days(carry)?, time))
    }

    pub fn checked_sub_duration(self, duration: Duration) -> Result<DateTime, Error> {
        self.checked_add_duration(duration.checked_neg()?)
    }

    /// Adds a period and then a duration, the order calendar arithmetic
    /// composes in.
    pub fn checked_add(self, period: Period, duration: Duration) -> Result<DateTime, Error> {
        self.checked_add_period(period)?.checked_add_duration(duration)
    }

    /// Exact time from this date-time to `other`, both read at the same offset.
    pub fn duration_until(self, other: DateTime) -> Duration {
        let secs = other.epoch_second_at(UtcOffset::UTC) - self.epoch_second_at(UtcOffset::UTC);
        let nanos = other.time.nanosecond() as i32 - self.time.nanosecond() as i32;
        // Both parts are far from their limits; normalization cannot fail.
        Duration::new(secs, nanos as i64).unwrap_or(Duration::ZERO)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<DateTime, Error> {
        parse::parse_all(s, "DateTime", |c| c.date_time())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for DateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> DateTime {
        use quickcheck::Arbitrary;
        DateTime::new(Date::arbitrary(g), Time::arbitrary(g))
    }
}
