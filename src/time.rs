// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Wall-clock time of day.

use crate::calendar::{
    NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND, SECONDS_PER_DAY,
};
use crate::duration::Duration;
use crate::error::Error;
use crate::math;
use crate::parse;
use std::fmt;
use std::str::FromStr;

/// A time of day with nanosecond precision and no date or zone.
///
/// Stored as nanoseconds since midnight, in `0..86_400 * 10^9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    nanos: i64,
}

impl Time {
    pub const MIDNIGHT: Time = Time { nanos: 0 };
    pub const NOON: Time = Time {
        nanos: 12 * NANOS_PER_HOUR,
    };
    /// One nanosecond before midnight.
    pub const MAX: Time = Time {
        nanos: NANOS_PER_DAY - 1,
    };

    /// Builds a time from its components.
    pub fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Result<Time, Error> {
        let hour = math::check_hour(hour as i64)? as i64;
        let minute = math::check_minute(minute as i64)? as i64;
        let second = math::check_second(second as i64)? as i64;
        let nanosecond = math::check_nanosecond(nanosecond as i64)? as i64;
        Ok(Time {
            nanos: hour * NANOS_PER_HOUR
                + minute * NANOS_PER_MINUTE
                + second * NANOS_PER_SECOND
                + nanosecond,
        })
    }

    /// Builds a time with whole seconds.
    pub fn from_hms(hour: u8, minute: u8, second: u8) -> Result<Time, Error> {
        Time::new(hour, minute, second, 0)
    }

    pub fn from_nanosecond_of_day(nanos: i64) -> Result<Time, Error> {
        if !(0..NANOS_PER_DAY).contains(&nanos) {
            return Err(Error::out_of_range(
                "nanosecond of day",
                nanos,
                0,
                NANOS_PER_DAY - 1,
            ));
        }
        Ok(Time { nanos })
    }

    pub fn from_second_of_day(seconds: i64) -> Result<Time, Error> {
        if !(0..SECONDS_PER_DAY).contains(&seconds) {
            return Err(Error::out_of_range(
                "second of day",
                seconds,
                0,
                SECONDS_PER_DAY - 1,
            ));
        }
        Ok(Time {
            nanos: seconds * NANOS_PER_SECOND,
        })
    }

    #[inline]
    pub const fn hour(self) -> u8 {
        (self.nanos / NANOS_PER_HOUR) as u8
    }

    #[inline]
    pub const fn minute(self) -> u8 {
        (self.nanos / NANOS_PER_MINUTE % 60) as u8
    }

    #[inline]
    pub const fn second(self) -> u8 {
        (self.nanos / NANOS_PER_SECOND % 60) as u8
    }

    #[inline]
    pub const fn nanosecond(self) -> u32 {
        (self.nanos % NANOS_PER_SECOND) as u32
    }

    #[inline]
    pub const fn second_of_day(self) -> i64 {
        self.nanos / NANOS_PER_SECOND
    }

    #[inline]
    pub const fn nanosecond_of_day(self) -> i64 {
        self.nanos
    }

    /// Adds a duration, wrapping around midnight.
    ///
    /// Returns the new time and the number of days carried, which is
    /// negative when the duration moves backward past midnight.
    pub fn wrapping_add(self, duration: Duration) -> (Time, i64) {
        let carry_days = math::floor_div(duration.seconds(), SECONDS_PER_DAY);
        let second_rem = math::floor_mod(duration.seconds(), SECONDS_PER_DAY);
        let total =
            self.nanos + second_rem * NANOS_PER_SECOND + duration.subsec_nanos() as i64;
        let extra_days = math::floor_div(total, NANOS_PER_DAY);
        let nanos = math::floor_mod(total, NANOS_PER_DAY);
        (Time { nanos }, carry_days + extra_days)
    }
}

/// Writes a nanosecond fraction with three, six or nine digits.
pub(crate) fn write_fraction(f: &mut fmt::Formatter<'_>, nanos: u32) -> fmt::Result {
    if nanos == 0 {
        Ok(())
    } else if nanos % 1_000_000 == 0 {
        write!(f, ".{:03}", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        write!(f, ".{:06}", nanos / 1_000)
    } else {
        write!(f, ".{nanos:09}")
    }
}

impl fmt::Display for Time {
    /// `HH:MM`, then `:SS` when seconds or nanoseconds are non-zero, then a
    /// fraction when nanoseconds are non-zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())?;
        let (second, nanos) = (self.second(), self.nanosecond());
        if second != 0 || nanos != 0 {
            write!(f, ":{second:02}")?;
            write_fraction(f, nanos)?;
        }
        Ok(())
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Time, Error> {
        parse::parse_all(s, "Time", |c| c.time())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Time {
    fn arbitrary(g: &mut quickcheck::Gen) -> Time {
        use quickcheck::Arbitrary;
        let nanos = math::floor_mod(i64::arbitrary(g), NANOS_PER_DAY);
        // Bias toward whole seconds and minutes so every textual form is hit.
        let nanos = match u8::arbitrary(g) % 3 {
            0 => nanos - nanos % NANOS_PER_MINUTE,
            1 => nanos - nanos % NANOS_PER_SECOND,
            _ => nanos,
        };
        Time { nanos }
    }
}
