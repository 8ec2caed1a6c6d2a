// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Points on the UTC timeline.
//!
//! [`Instant`] counts seconds and nanoseconds from 1970-01-01T00:00Z and is
//! the common currency between local representations: a [`DateTime`] plus a
//! [`UtcOffset`] resolves to exactly one `Instant`, and an `Instant` plus a
//! zone resolves to exactly one local reading.
//!
//! [`TimeInstant`] abstracts over every type that identifies a position on a
//! timeline, which lets [`Interval`](crate::Interval) work with instants,
//! offset date-times, zoned date-times and plain local date-times alike.

use crate::calendar::{MAX_EPOCH_DAY, MIN_EPOCH_DAY, NANOS_PER_SECOND, SECONDS_PER_DAY};
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::math;
use crate::offset::UtcOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::parse;
use qtty::{Day, Days, Seconds};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

const MIN_SECOND: i64 = MIN_EPOCH_DAY * SECONDS_PER_DAY;
const MAX_SECOND: i64 = MAX_EPOCH_DAY * SECONDS_PER_DAY + SECONDS_PER_DAY - 1;

/// Julian Day of 1970-01-01T00:00Z.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

// ═══════════════════════════════════════════════════════════════════════════
// TimeInstant trait
// ═══════════════════════════════════════════════════════════════════════════

/// A position on a timeline that supports exact duration arithmetic.
pub trait TimeInstant: Clone + PartialEq + PartialOrd + Sized {
    /// Exact duration from `other` to `self`.
    fn difference(&self, other: &Self) -> Duration;

    /// Moves forward by `duration`.
    fn checked_add_duration(&self, duration: Duration) -> Result<Self, Error>;

    /// Moves backward by `duration`.
    fn checked_sub_duration(&self, duration: Duration) -> Result<Self, Error> {
        self.checked_add_duration(duration.checked_neg()?)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// A point on the UTC timeline with nanosecond precision.
///
/// The supported range is `Date::MIN` at midnight UTC through the last
/// nanosecond of `Date::MAX` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    secs: i64,
    nanos: u32,
}

impl Instant {
    pub const UNIX_EPOCH: Instant = Instant { secs: 0, nanos: 0 };
    pub const MIN: Instant = Instant {
        secs: MIN_SECOND,
        nanos: 0,
    };
    pub const MAX: Instant = Instant {
        secs: MAX_SECOND,
        nanos: NANOS_PER_SECOND as u32 - 1,
    };

    // ── constructors ──────────────────────────────────────────────────

    /// Builds an instant from epoch seconds and a nanosecond adjustment of
    /// any sign and magnitude.
    pub fn from_epoch_second(epoch_second: i64, nanosecond_adjustment: i64) -> Result<Instant, Error> {
        let secs = math::plus_exact(
            epoch_second,
            math::floor_div(nanosecond_adjustment, NANOS_PER_SECOND),
        )?;
        let nanos = math::floor_mod(nanosecond_adjustment, NANOS_PER_SECOND) as u32;
        if !(MIN_SECOND..=MAX_SECOND).contains(&secs) {
            return Err(Error::out_of_range("epoch second", secs, MIN_SECOND, MAX_SECOND));
        }
        Ok(Instant { secs, nanos })
    }

    pub fn from_epoch_milli(epoch_milli: i64) -> Result<Instant, Error> {
        Instant::from_epoch_second(
            math::floor_div(epoch_milli, 1_000),
            math::floor_mod(epoch_milli, 1_000) * 1_000_000,
        )
    }

    // Clamps into the supported range. Used when looking up rules near the
    // ends of the timeline.
    pub(crate) fn from_epoch_second_saturating(epoch_second: i64) -> Instant {
        Instant {
            secs: epoch_second.clamp(MIN_SECOND, MAX_SECOND),
            nanos: 0,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Whole seconds since the epoch, rounded toward negative infinity.
    #[inline]
    pub const fn epoch_second(self) -> i64 {
        self.secs
    }

    /// Nanoseconds within the second, always non-negative.
    #[inline]
    pub const fn nanosecond(self) -> u32 {
        self.nanos
    }

    /// Milliseconds since the epoch, rounded toward negative infinity.
    ///
    /// Fails with an overflow error near the ends of the supported range,
    /// where the count no longer fits in an `i64`.
    pub fn epoch_milli(self) -> Result<i64, Error> {
        let millis = (self.nanos / 1_000_000) as i64;
        if self.secs < 0 && self.nanos > 0 {
            // Borrow a second so the product stays in range down to i64::MIN.
            let whole = math::times_exact(self.secs + 1, 1_000)?;
            return math::plus_exact(whole, millis - 1_000);
        }
        math::plus_exact(math::times_exact(self.secs, 1_000)?, millis)
    }

    /// Julian Day as a floating-point quantity of days.
    pub fn to_julian_day(self) -> Days {
        let since_epoch = Seconds::new(self.secs as f64 + self.nanos as f64 / 1e9);
        Days::new(UNIX_EPOCH_JD) + since_epoch.to::<Day>()
    }

    // ── conversions ───────────────────────────────────────────────────

    /// The local reading of this instant at `offset`.
    pub fn to_date_time_at(self, offset: UtcOffset) -> Result<DateTime, Error> {
        DateTime::from_epoch_second(self.secs, self.nanos, offset)
    }

    /// This instant read at `offset`.
    pub fn at_offset(self, offset: UtcOffset) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::new(self.to_date_time_at(offset)?, offset))
    }

    pub(crate) fn to_utc_date_time(self) -> DateTime {
        // Every instant in range has a UTC reading in the supported date range.
        DateTime::from_epoch_second(self.secs, self.nanos, UtcOffset::UTC).unwrap_or(DateTime::MIN)
    }

    /// Converts to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` outside chrono's representable range.
    pub fn to_utc(self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::<chrono::Utc>::from_timestamp(self.secs, self.nanos)
    }

    /// Builds an instant from a `chrono::DateTime<Utc>`.
    pub fn from_utc(datetime: chrono::DateTime<chrono::Utc>) -> Instant {
        Instant {
            secs: datetime.timestamp(),
            nanos: datetime.timestamp_subsec_nanos(),
        }
    }

    // ── arithmetic ────────────────────────────────────────────────────

    pub fn checked_add(self, duration: Duration) -> Result<Instant, Error> {
        let secs = math::plus_exact(self.secs, duration.seconds())?;
        Instant::from_epoch_second(secs, self.nanos as i64 + duration.subsec_nanos() as i64)
            .map_err(|_| Error::overflow("instant plus duration"))
    }

    pub fn checked_sub(self, duration: Duration) -> Result<Instant, Error> {
        self.checked_add(duration.checked_neg()?)
    }

    /// Exact duration from this instant to `other`.
    pub fn duration_until(self, other: Instant) -> Duration {
        // Seconds differ by at most the width of the supported range.
        Duration::new(
            other.secs - self.secs,
            other.nanos as i64 - self.nanos as i64,
        )
        .unwrap_or(Duration::ZERO)
    }
}

impl TimeInstant for Instant {
    fn difference(&self, other: &Self) -> Duration {
        other.duration_until(*self)
    }

    fn checked_add_duration(&self, duration: Duration) -> Result<Self, Error> {
        self.checked_add(duration)
    }
}

impl TimeInstant for DateTime {
    fn difference(&self, other: &Self) -> Duration {
        other.duration_until(*self)
    }

    fn checked_add_duration(&self, duration: Duration) -> Result<Self, Error> {
        DateTime::checked_add_duration(*self, duration)
    }
}

/// # Panics
///
/// Panics when the result is out of range. Use [`Instant::checked_add`]
/// to handle that case.
impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        self.checked_add(rhs).expect("instant plus duration overflowed")
    }
}

/// # Panics
///
/// Panics when the result is out of range.
impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        self.checked_sub(rhs).expect("instant minus duration overflowed")
    }
}

impl Sub for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        rhs.duration_until(self)
    }
}

impl fmt::Display for Instant {
    /// RFC 3339 in UTC, always with seconds: `2018-01-31T10:15:30Z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.to_utc_date_time();
        let time = local.time();
        write!(
            f,
            "{}T{:02}:{:02}:{:02}",
            local.date(),
            time.hour(),
            time.minute(),
            time.second()
        )?;
        crate::time::write_fraction(f, time.nanosecond())?;
        f.write_str("Z")
    }
}

impl FromStr for Instant {
    type Err = Error;

    /// Accepts any offset, not only `Z`, and converts to the UTC timeline.
    fn from_str(s: &str) -> Result<Instant, Error> {
        let value: OffsetDateTime =
            parse::parse_all(s, "Instant", |c| c.offset_date_time())?;
        value.to_instant()
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        use quickcheck::Arbitrary;
        let secs = math::floor_mod(i64::arbitrary(g), 8_000_000_000) - 4_000_000_000;
        let nanos = if bool::arbitrary(g) {
            0
        } else {
            u32::arbitrary(g) % NANOS_PER_SECOND as u32
        };
        Instant { secs, nanos }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, ErrorKind};
    use quickcheck::quickcheck;

    #[test]
    fn normalizes_negative_nanos() {
        let instant = Instant::from_epoch_second(10, -1).unwrap();
        assert_eq!((instant.epoch_second(), instant.nanosecond()), (9, 999_999_999));
        let instant = Instant::from_epoch_milli(-1).unwrap();
        assert_eq!((instant.epoch_second(), instant.nanosecond()), (-1, 999_000_000));
        assert_eq!(instant.epoch_milli(), Ok(-1));
        let instant = Instant::from_epoch_second(-1, 1).unwrap();
        assert_eq!(instant.epoch_milli(), Ok(-1_000));
    }

    #[test]
    fn epoch_milli_overflows_at_range_ends() {
        assert_eq!(Instant::MAX.epoch_milli().unwrap_err().kind(), ErrorKind::Overflow);
        assert_eq!(Instant::MIN.epoch_milli().unwrap_err().kind(), ErrorKind::Overflow);
        let limit = Instant::from_epoch_milli(i64::MAX).unwrap();
        assert_eq!(limit.epoch_milli(), Ok(i64::MAX));
        let limit = Instant::from_epoch_milli(i64::MIN).unwrap();
        assert_eq!(limit.epoch_milli(), Ok(i64::MIN));
    }

    #[test]
    fn range_matches_dates() {
        assert_eq!(
            Instant::MIN.to_date_time_at(UtcOffset::UTC).unwrap().date(),
            Date::MIN
        );
        assert_eq!(
            Instant::MAX.to_date_time_at(UtcOffset::UTC).unwrap(),
            DateTime::MAX
        );
        assert!(Instant::from_epoch_second(MAX_SECOND + 1, 0).is_err());
        assert_eq!(
            Instant::MAX.checked_add(Duration::of_nanos(1)).unwrap_err().kind(),
            ErrorKind::Overflow
        );
        // Instant::MIN is midnight UTC; east of UTC the local reading is
        // still on Date::MIN, west of UTC it falls before it.
        let west = UtcOffset::from_hms(-1, 0, 0).unwrap();
        assert!(Instant::MIN.at_offset(west).is_err());
    }

    #[test]
    fn arithmetic_and_difference() {
        let a = Instant::from_epoch_second(100, 250).unwrap();
        let b = a + Duration::new(1, 999_999_900).unwrap();
        assert_eq!((b.epoch_second(), b.nanosecond()), (102, 150));
        assert_eq!(b - a, Duration::new(1, 999_999_900).unwrap());
        assert_eq!(a - b, Duration::new(-1, -999_999_900).unwrap());
        assert_eq!(b.difference(&a), b - a);
        assert_eq!(b - Duration::new(1, 999_999_900).unwrap(), a);
    }

    #[test]
    fn chrono_interop() {
        let chrono_utc = chrono::DateTime::from_timestamp(1_700_000_000, 42).unwrap();
        let instant = Instant::from_utc(chrono_utc);
        assert_eq!(instant.epoch_second(), 1_700_000_000);
        assert_eq!(instant.to_utc(), Some(chrono_utc));
        assert_eq!(Instant::MAX.to_utc(), None);
    }

    #[test]
    fn julian_day() {
        assert_eq!(Instant::UNIX_EPOCH.to_julian_day(), Days::new(2_440_587.5));
        let j2000 = Instant::from_epoch_second(946_728_000, 0).unwrap();
        assert!((j2000.to_julian_day().value() - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn display_and_parse() {
        let instant = Instant::from_epoch_second(1_517_393_730, 0).unwrap();
        assert_eq!(instant.to_string(), "2018-01-31T10:15:30Z");
        assert_eq!(Instant::UNIX_EPOCH.to_string(), "1970-01-01T00:00:00Z");
        assert_eq!(
            Instant::from_epoch_milli(1).unwrap().to_string(),
            "1970-01-01T00:00:00.001Z"
        );
        assert_eq!("2018-01-31T10:15:30Z".parse::<Instant>().unwrap(), instant);
        assert_eq!("2018-01-31T11:15:30+01:00".parse::<Instant>().unwrap(), instant);
        assert!("2018-01-31T10:15:30".parse::<Instant>().is_err());
    }

    quickcheck! {
        fn prop_epoch_milli_round_trip(instant: Instant) -> bool {
            let millis = instant.epoch_milli().unwrap();
            let back = Instant::from_epoch_milli(millis).unwrap();
            back.epoch_second() == instant.epoch_second()
                && back.nanosecond() == instant.nanosecond() / 1_000_000 * 1_000_000
        }

        fn prop_text_round_trip(instant: Instant) -> bool {
            instant.to_string().parse::<Instant>() == Ok(instant)
        }

        fn prop_offset_round_trip(instant: Instant, minutes: i16) -> bool {
            let offset = UtcOffset::from_seconds((minutes as i32 % (18 * 60)) * 60).unwrap();
            let local = instant.to_date_time_at(offset).unwrap();
            local.to_instant_at(offset) == Ok(instant)
        }
    }
}
