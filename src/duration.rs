// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Exact elapsed time.
//!
//! A [`Duration`] is a signed count of seconds plus a nanosecond adjustment
//! carrying the same sign. Unlike a [`Period`](crate::Period) it never
//! depends on the calendar: a day is always 86 400 seconds.

use crate::calendar::{NANOS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::error::Error;
use crate::math;
use crate::parse;
use crate::time::write_fraction;
use crate::unit::TimeUnit;
use qtty::{Day, Days, Seconds};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// A signed, exact span of time with nanosecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    secs: i64,
    nanos: i32,
}

impl Duration {
    pub const ZERO: Duration = Duration { secs: 0, nanos: 0 };
    pub const MIN: Duration = Duration {
        secs: i64::MIN,
        nanos: -(NANOS_PER_SECOND as i32 - 1),
    };
    pub const MAX: Duration = Duration {
        secs: i64::MAX,
        nanos: NANOS_PER_SECOND as i32 - 1,
    };

    // ── constructors ──────────────────────────────────────────────────

    /// Builds a duration from seconds and a nanosecond adjustment of any
    /// sign and magnitude.
    pub fn new(seconds: i64, nanoseconds: i64) -> Result<Duration, Error> {
        let carry = nanoseconds / NANOS_PER_SECOND;
        let nanos = (nanoseconds % NANOS_PER_SECOND) as i32;
        let secs = math::plus_exact(seconds, carry)?;
        Duration::normalize(secs, nanos)
    }

    // Brings `nanos` to the sign of `secs`. `nanos` is within one second.
    fn normalize(mut secs: i64, mut nanos: i32) -> Result<Duration, Error> {
        const ONE: i32 = NANOS_PER_SECOND as i32;
        if nanos >= ONE {
            secs = math::plus_exact(secs, 1)?;
            nanos -= ONE;
        } else if nanos <= -ONE {
            secs = math::minus_exact(secs, 1)?;
            nanos += ONE;
        }
        if secs > 0 && nanos < 0 {
            secs -= 1;
            nanos += ONE;
        } else if secs < 0 && nanos > 0 {
            secs += 1;
            nanos -= ONE;
        }
        Ok(Duration { secs, nanos })
    }

    #[inline]
    pub const fn of_seconds(seconds: i64) -> Duration {
        Duration {
            secs: seconds,
            nanos: 0,
        }
    }

    #[inline]
    pub const fn of_nanos(nanos: i64) -> Duration {
        Duration {
            secs: nanos / NANOS_PER_SECOND,
            nanos: (nanos % NANOS_PER_SECOND) as i32,
        }
    }

    #[inline]
    pub const fn of_micros(micros: i64) -> Duration {
        Duration {
            secs: micros / 1_000_000,
            nanos: (micros % 1_000_000) as i32 * 1_000,
        }
    }

    #[inline]
    pub const fn of_millis(millis: i64) -> Duration {
        Duration {
            secs: millis / 1_000,
            nanos: (millis % 1_000) as i32 * 1_000_000,
        }
    }

    pub fn of_minutes(minutes: i64) -> Result<Duration, Error> {
        Ok(Duration::of_seconds(math::times_exact(minutes, SECONDS_PER_MINUTE)?))
    }

    pub fn of_hours(hours: i64) -> Result<Duration, Error> {
        Ok(Duration::of_seconds(math::times_exact(hours, SECONDS_PER_HOUR)?))
    }

    /// Days of exactly 24 hours.
    pub fn of_days(days: i64) -> Result<Duration, Error> {
        Ok(Duration::of_seconds(math::times_exact(days, SECONDS_PER_DAY)?))
    }

    /// `amount` of a fixed-length unit.
    ///
    /// Month-based units have no fixed length and fail with
    /// [`Error::UnsupportedUnit`].
    pub fn of(amount: i64, unit: TimeUnit) -> Result<Duration, Error> {
        match unit {
            TimeUnit::Nanoseconds => Ok(Duration::of_nanos(amount)),
            TimeUnit::Microseconds => Ok(Duration::of_micros(amount)),
            TimeUnit::Milliseconds => Ok(Duration::of_millis(amount)),
            _ => match unit.seconds() {
                Some(per_unit) => Ok(Duration::of_seconds(math::times_exact(amount, per_unit)?)),
                None => Err(Error::UnsupportedUnit {
                    unit,
                    operation: "a duration",
                }),
            },
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Whole seconds, truncated toward zero.
    #[inline]
    pub const fn seconds(self) -> i64 {
        self.secs
    }

    /// Nanosecond adjustment, with the same sign as [`Duration::seconds`].
    #[inline]
    pub const fn subsec_nanos(self) -> i32 {
        self.nanos
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.secs < 0 || self.nanos < 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.secs > 0 || self.nanos > 0
    }

    /// Whole number of `unit` in this duration, truncated toward zero.
    pub fn in_whole(self, unit: TimeUnit) -> Result<i64, Error> {
        let per_unit = unit.nanoseconds().ok_or(Error::UnsupportedUnit {
            unit,
            operation: "a duration",
        })?;
        let total = self.secs as i128 * NANOS_PER_SECOND as i128 + self.nanos as i128;
        i64::try_from(total / per_unit as i128).map_err(|_| Error::overflow("in_whole"))
    }

    /// This duration as a floating-point quantity of seconds.
    pub fn to_seconds_quantity(self) -> Seconds {
        Seconds::new(self.secs as f64 + self.nanos as f64 / NANOS_PER_SECOND as f64)
    }

    /// This duration as a floating-point quantity of 24-hour days.
    pub fn to_days_quantity(self) -> Days {
        self.to_seconds_quantity().to::<Day>()
    }

    // ── arithmetic ────────────────────────────────────────────────────

    pub fn checked_add(self, other: Duration) -> Result<Duration, Error> {
        let secs = math::plus_exact(self.secs, other.secs)?;
        Duration::normalize(secs, self.nanos + other.nanos)
    }

    pub fn checked_sub(self, other: Duration) -> Result<Duration, Error> {
        self.checked_add(other.checked_neg()?)
    }

    pub fn checked_neg(self) -> Result<Duration, Error> {
        Ok(Duration {
            secs: math::negate_exact(self.secs)?,
            nanos: -self.nanos,
        })
    }

    pub fn checked_abs(self) -> Result<Duration, Error> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    pub fn checked_mul(self, factor: i64) -> Result<Duration, Error> {
        let total = (self.secs as i128 * NANOS_PER_SECOND as i128 + self.nanos as i128)
            .checked_mul(factor as i128)
            .ok_or(Error::overflow("duration multiply"))?;
        let secs = i64::try_from(total / NANOS_PER_SECOND as i128)
            .map_err(|_| Error::overflow("duration multiply"))?;
        Ok(Duration {
            secs,
            nanos: (total % NANOS_PER_SECOND as i128) as i32,
        })
    }
}

/// # Panics
///
/// Panics on overflow. Use [`Duration::checked_add`] to handle that case.
impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        self.checked_add(rhs).expect("duration addition overflowed")
    }
}

/// # Panics
///
/// Panics on overflow. Use [`Duration::checked_sub`] to handle that case.
impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        self.checked_sub(rhs).expect("duration subtraction overflowed")
    }
}

/// # Panics
///
/// Panics for [`Duration::MIN`].
impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        self.checked_neg().expect("duration negation overflowed")
    }
}

impl fmt::Display for Duration {
    /// ISO-8601 form such as `PT1H2M3.5S`. Every component carries the sign
    /// of the duration, so `-90` seconds prints as `PT-1M-30S`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        let hours = self.secs / SECONDS_PER_HOUR;
        let minutes = self.secs % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
        let seconds = self.secs % SECONDS_PER_MINUTE;
        f.write_str("PT")?;
        if hours != 0 {
            write!(f, "{hours}H")?;
        }
        if minutes != 0 {
            write!(f, "{minutes}M")?;
        }
        if seconds != 0 || self.nanos != 0 {
            if seconds == 0 && self.nanos < 0 {
                f.write_str("-0")?;
            } else {
                write!(f, "{seconds}")?;
            }
            write_fraction(f, self.nanos.unsigned_abs())?;
            f.write_str("S")?;
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Duration, Error> {
        parse::parse_all(s, "Duration", |c| c.duration())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        use quickcheck::Arbitrary;
        let secs = i64::arbitrary(g) % 10_000_000_000;
        let nanos = (i32::arbitrary(g) % 1_000_000_000).abs();
        let nanos = if bool::arbitrary(g) { 0 } else { nanos };
        let nanos = if secs < 0 { -nanos } else { nanos };
        Duration { secs, nanos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use quickcheck::quickcheck;

    #[test]
    fn normalizes_nanos_to_the_sign_of_seconds() {
        let d = Duration::new(1, -500_000_000).unwrap();
        assert_eq!((d.seconds(), d.subsec_nanos()), (0, 500_000_000));
        let d = Duration::new(-1, 500_000_000).unwrap();
        assert_eq!((d.seconds(), d.subsec_nanos()), (0, -500_000_000));
        let d = Duration::new(2, 3_500_000_000).unwrap();
        assert_eq!((d.seconds(), d.subsec_nanos()), (5, 500_000_000));
        assert!(Duration::new(i64::MAX, 1_000_000_000).is_err());
    }

    #[test]
    fn arithmetic() {
        let a = Duration::of_millis(1_500);
        let b = Duration::of_millis(-2_250);
        assert_eq!(a + b, Duration::of_millis(-750));
        assert_eq!(a - b, Duration::of_millis(3_750));
        assert_eq!(-a, Duration::of_millis(-1_500));
        assert_eq!(a.checked_mul(-3).unwrap(), Duration::of_millis(-4_500));
        assert_eq!(b.checked_abs().unwrap(), Duration::of_millis(2_250));
        assert!(b < Duration::ZERO && Duration::ZERO < a);
        assert_eq!(
            Duration::MAX.checked_add(Duration::of_nanos(1)).unwrap_err().kind(),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn units() {
        assert_eq!(Duration::of(3, TimeUnit::Hours).unwrap(), Duration::of_seconds(10_800));
        assert_eq!(Duration::of(2, TimeUnit::Weeks).unwrap(), Duration::of_days(14).unwrap());
        assert_eq!(
            Duration::of(1, TimeUnit::Months).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        let d = Duration::new(5_400, 1).unwrap();
        assert_eq!(d.in_whole(TimeUnit::Hours), Ok(1));
        assert_eq!(d.in_whole(TimeUnit::Minutes), Ok(90));
        assert_eq!(d.in_whole(TimeUnit::Nanoseconds), Ok(5_400_000_000_001));
        assert!(Duration::MAX.in_whole(TimeUnit::Nanoseconds).is_err());
    }

    #[test]
    fn quantities() {
        let d = Duration::of_hours(36).unwrap();
        assert_eq!(d.to_seconds_quantity(), Seconds::new(129_600.0));
        assert!((d.to_days_quantity().value() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn display() {
        assert_eq!(Duration::ZERO.to_string(), "PT0S");
        assert_eq!(Duration::new(3_723, 500_000_000).unwrap().to_string(), "PT1H2M3.500S");
        assert_eq!(Duration::of_seconds(-90).to_string(), "PT-1M-30S");
        assert_eq!(Duration::of_millis(-500).to_string(), "PT-0.500S");
        assert_eq!(Duration::of_hours(48).unwrap().to_string(), "PT48H");
    }

    #[test]
    fn parse() {
        assert_eq!("PT1H2M3.5S".parse::<Duration>().unwrap(), Duration::new(3_723, 500_000_000).unwrap());
        assert_eq!("P1DT1H".parse::<Duration>().unwrap(), Duration::of_hours(25).unwrap());
        assert_eq!("-PT1M".parse::<Duration>().unwrap(), Duration::of_seconds(-60));
        assert_eq!("PT-0.5S".parse::<Duration>().unwrap(), Duration::of_millis(-500));
        assert!("PT".parse::<Duration>().is_err());
        assert!("P1Y".parse::<Duration>().is_err());
    }

    quickcheck! {
        fn prop_text_round_trip(d: Duration) -> bool {
            d.to_string().parse::<Duration>() == Ok(d)
        }
    }
}
