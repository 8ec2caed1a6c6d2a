// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Rounding and truncation of times of day and timeline positions.
//!
//! Every value is rounded on a grid anchored at midnight, local midnight for
//! local types and UTC midnight for [`Instant`]. A grid is either a unit up
//! to [`TimeUnit::Days`] or an increment that tiles the next larger unit:
//!
//! | Increment | Must divide evenly into |
//! |-----------|-------------------------|
//! | whole hours | a day |
//! | whole minutes, under an hour | an hour |
//! | whole seconds, under a minute | a minute |
//! | under a second | a second |
//!
//! Rounding a time of day up past the last grid point wraps to midnight.
//! Types with a date carry into the next day instead.

use crate::calendar::{NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND};
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::instant::Instant;
use crate::offset_datetime::OffsetDateTime;
use crate::offset_time::OffsetTime;
use crate::time::Time;
use crate::unit::TimeUnit;
use crate::zoned::ZonedDateTime;

/// Direction to take when a value lies between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// The earlier grid point. Same as truncation.
    Down,
    /// The later grid point, unless the value is already on the grid.
    Up,
    /// The nearer grid point, the later one when exactly halfway.
    #[default]
    HalfUp,
}

impl RoundingMode {
    // `remainder` is in `1..increment`.
    fn rounds_up(self, remainder: i128, increment: i128) -> bool {
        match self {
            RoundingMode::Down => false,
            RoundingMode::Up => true,
            RoundingMode::HalfUp => remainder * 2 >= increment,
        }
    }
}

/// Rounds `value` onto the grid of `increment` nanoseconds anchored at zero.
fn round_nanos(value: i128, increment: i64, mode: RoundingMode) -> i128 {
    let increment = increment as i128;
    let remainder = value.rem_euclid(increment);
    let down = value - remainder;
    if remainder != 0 && mode.rounds_up(remainder, increment) {
        down + increment
    } else {
        down
    }
}

fn unit_nanos(unit: TimeUnit) -> Result<i64, Error> {
    match unit.nanoseconds() {
        Some(nanos) if unit <= TimeUnit::Days => Ok(nanos),
        _ => Err(Error::UnsupportedUnit {
            unit,
            operation: "rounding",
        }),
    }
}

fn increment_nanos(increment: Duration) -> Result<i64, Error> {
    let invalid = || Error::InvalidRoundingIncrement { increment };
    if !increment.is_positive() {
        return Err(invalid());
    }
    let nanos = increment
        .in_whole(TimeUnit::Nanoseconds)
        .map_err(|_| invalid())?;
    let tiles = |grain: i64, whole: i64| nanos % grain == 0 && whole % nanos == 0;
    let valid = if nanos >= NANOS_PER_HOUR {
        tiles(NANOS_PER_HOUR, NANOS_PER_DAY)
    } else if nanos >= NANOS_PER_MINUTE {
        tiles(NANOS_PER_MINUTE, NANOS_PER_HOUR)
    } else if nanos >= NANOS_PER_SECOND {
        tiles(NANOS_PER_SECOND, NANOS_PER_MINUTE)
    } else {
        NANOS_PER_SECOND % nanos == 0
    };
    if valid {
        Ok(nanos)
    } else {
        Err(invalid())
    }
}

// ── Time ──────────────────────────────────────────────────────────────

impl Time {
    /// Rounds to a whole `unit`, wrapping to midnight past the last one.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedUnit`] for units longer than a day.
    pub fn rounded_to(self, unit: TimeUnit, mode: RoundingMode) -> Result<Time, Error> {
        Ok(self.round_carrying(unit_nanos(unit)?, mode)?.0)
    }

    /// Rounds to a multiple of `increment` counted from midnight.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRoundingIncrement`] unless the increment tiles the
    /// next larger unit.
    pub fn rounded_to_increment(self, increment: Duration, mode: RoundingMode) -> Result<Time, Error> {
        Ok(self.round_carrying(increment_nanos(increment)?, mode)?.0)
    }

    /// Drops everything finer than `unit`.
    pub fn truncated_to(self, unit: TimeUnit) -> Result<Time, Error> {
        self.rounded_to(unit, RoundingMode::Down)
    }

    // The flag is set when rounding reached the next midnight.
    fn round_carrying(self, increment: i64, mode: RoundingMode) -> Result<(Time, bool), Error> {
        let rounded = round_nanos(self.nanosecond_of_day() as i128, increment, mode) as i64;
        if rounded >= NANOS_PER_DAY {
            Ok((Time::MIDNIGHT, true))
        } else {
            Ok((Time::from_nanosecond_of_day(rounded)?, false))
        }
    }
}

impl OffsetTime {
    /// Rounds the local time, keeping the offset.
    pub fn rounded_to(self, unit: TimeUnit, mode: RoundingMode) -> Result<OffsetTime, Error> {
        Ok(self.with_time(self.time().rounded_to(unit, mode)?))
    }

    pub fn rounded_to_increment(
        self,
        increment: Duration,
        mode: RoundingMode,
    ) -> Result<OffsetTime, Error> {
        Ok(self.with_time(self.time().rounded_to_increment(increment, mode)?))
    }

    pub fn truncated_to(self, unit: TimeUnit) -> Result<OffsetTime, Error> {
        self.rounded_to(unit, RoundingMode::Down)
    }
}

// ── date-times ────────────────────────────────────────────────────────

impl DateTime {
    /// Rounds the time of day to a whole `unit`, moving to the next day's
    /// midnight when it rounds past the last one.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedUnit`] for units longer than a day, or an
    /// overflow error when rounding up past [`DateTime::MAX`].
    pub fn rounded_to(self, unit: TimeUnit, mode: RoundingMode) -> Result<DateTime, Error> {
        self.round_with(unit_nanos(unit)?, mode)
    }

    pub fn rounded_to_increment(
        self,
        increment: Duration,
        mode: RoundingMode,
    ) -> Result<DateTime, Error> {
        self.round_with(increment_nanos(increment)?, mode)
    }

    pub fn truncated_to(self, unit: TimeUnit) -> Result<DateTime, Error> {
        self.rounded_to(unit, RoundingMode::Down)
    }

    fn round_with(self, increment: i64, mode: RoundingMode) -> Result<DateTime, Error> {
        match self.time().round_carrying(increment, mode)? {
            (time, false) => Ok(self.with_time(time)),
            (time, true) => Ok(DateTime::new(self.date().checked_add_days(1)?, time)),
        }
    }
}

impl OffsetDateTime {
    /// Rounds the local date-time, keeping the offset.
    pub fn rounded_to(self, unit: TimeUnit, mode: RoundingMode) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::new(self.date_time().rounded_to(unit, mode)?, self.offset()))
    }

    pub fn rounded_to_increment(
        self,
        increment: Duration,
        mode: RoundingMode,
    ) -> Result<OffsetDateTime, Error> {
        let date_time = self.date_time().rounded_to_increment(increment, mode)?;
        Ok(OffsetDateTime::new(date_time, self.offset()))
    }

    pub fn truncated_to(self, unit: TimeUnit) -> Result<OffsetDateTime, Error> {
        self.rounded_to(unit, RoundingMode::Down)
    }
}

impl ZonedDateTime {
    /// Rounds the local date-time and resolves it again in the same zone.
    ///
    /// The current offset is kept when the zone still allows it. A result in
    /// a gap moves forward by the length of the gap.
    pub fn rounded_to(&self, unit: TimeUnit, mode: RoundingMode) -> Result<ZonedDateTime, Error> {
        self.with_local(self.date_time().rounded_to(unit, mode)?)
    }

    pub fn rounded_to_increment(
        &self,
        increment: Duration,
        mode: RoundingMode,
    ) -> Result<ZonedDateTime, Error> {
        self.with_local(self.date_time().rounded_to_increment(increment, mode)?)
    }

    pub fn truncated_to(&self, unit: TimeUnit) -> Result<ZonedDateTime, Error> {
        self.rounded_to(unit, RoundingMode::Down)
    }

    fn with_local(&self, date_time: DateTime) -> Result<ZonedDateTime, Error> {
        if date_time == self.date_time() {
            return Ok(self.clone());
        }
        ZonedDateTime::from_local_preferring(date_time, self.zone().clone(), self.offset())
    }
}

// ── Instant ───────────────────────────────────────────────────────────

impl Instant {
    /// Rounds on a grid anchored at midnight UTC, so days end at UTC
    /// midnight and instants before 1970 round toward the earlier point
    /// under [`RoundingMode::Down`].
    pub fn rounded_to(self, unit: TimeUnit, mode: RoundingMode) -> Result<Instant, Error> {
        self.round_with(unit_nanos(unit)?, mode)
    }

    pub fn rounded_to_increment(
        self,
        increment: Duration,
        mode: RoundingMode,
    ) -> Result<Instant, Error> {
        self.round_with(increment_nanos(increment)?, mode)
    }

    pub fn truncated_to(self, unit: TimeUnit) -> Result<Instant, Error> {
        self.rounded_to(unit, RoundingMode::Down)
    }

    fn round_with(self, increment: i64, mode: RoundingMode) -> Result<Instant, Error> {
        let total = self.epoch_second() as i128 * NANOS_PER_SECOND as i128 + self.nanosecond() as i128;
        let rounded = round_nanos(total, increment, mode);
        let nanos_per_second = NANOS_PER_SECOND as i128;
        // Within a day of the supported range, so the seconds fit in an i64.
        let secs = rounded.div_euclid(nanos_per_second) as i64;
        let nanos = rounded.rem_euclid(nanos_per_second) as i64;
        Instant::from_epoch_second(secs, nanos).map_err(|_| Error::overflow("round instant"))
    }
}

// ── Duration ──────────────────────────────────────────────────────────

impl Duration {
    /// Drops everything finer than `unit`, toward zero.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedUnit`] for units without a fixed length.
    pub fn truncated_to(self, unit: TimeUnit) -> Result<Duration, Error> {
        let per_unit = unit.nanoseconds().ok_or(Error::UnsupportedUnit {
            unit,
            operation: "truncation",
        })? as i128;
        let nanos_per_second = NANOS_PER_SECOND as i128;
        let total = self.seconds() as i128 * nanos_per_second + self.subsec_nanos() as i128;
        // Toward zero, so the magnitude never grows and the seconds still fit.
        let truncated = total / per_unit * per_unit;
        Duration::new(
            (truncated / nanos_per_second) as i64,
            (truncated % nanos_per_second) as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::UtcOffset;
    use crate::tz::TimeZone;
    use crate::ErrorKind;
    use quickcheck::quickcheck;

    fn time(text: &str) -> Time {
        text.parse().unwrap()
    }

    fn local(text: &str) -> DateTime {
        text.parse().unwrap()
    }

    fn instant(text: &str) -> Instant {
        text.parse().unwrap()
    }

    fn minutes(n: i64) -> Duration {
        Duration::of_minutes(n).unwrap()
    }

    #[test]
    fn nearest_rounds_halfway_up() {
        let t = time("10:29:59.999999999");
        assert_eq!(t.rounded_to(TimeUnit::Hours, RoundingMode::HalfUp), Ok(time("10:00")));
        assert_eq!(time("10:30").rounded_to(TimeUnit::Hours, RoundingMode::HalfUp), Ok(time("11:00")));
        assert_eq!(t.rounded_to(TimeUnit::Seconds, RoundingMode::HalfUp), Ok(time("10:30")));
        assert_eq!(t.truncated_to(TimeUnit::Minutes), Ok(time("10:29")));
        assert_eq!(t.rounded_to(TimeUnit::Nanoseconds, RoundingMode::Up), Ok(t));
    }

    #[test]
    fn time_wraps_and_date_time_carries() {
        let t = time("23:45");
        assert_eq!(t.rounded_to(TimeUnit::Hours, RoundingMode::Up), Ok(Time::MIDNIGHT));
        assert_eq!(t.rounded_to(TimeUnit::Days, RoundingMode::HalfUp), Ok(Time::MIDNIGHT));
        assert_eq!(
            local("2018-12-31T23:45").rounded_to(TimeUnit::Hours, RoundingMode::Up),
            Ok(local("2019-01-01T00:00"))
        );
        assert_eq!(
            local("2018-12-31T11:59").rounded_to(TimeUnit::Days, RoundingMode::HalfUp),
            Ok(local("2018-12-31T00:00"))
        );
        let last = DateTime::MAX;
        assert_eq!(
            last.rounded_to(TimeUnit::Seconds, RoundingMode::Up).unwrap_err().kind(),
            ErrorKind::Overflow
        );
        assert_eq!(
            last.truncated_to(TimeUnit::Days),
            Ok(DateTime::new(last.date(), Time::MIDNIGHT))
        );
    }

    #[test]
    fn increments() {
        let t = time("10:07:30");
        assert_eq!(t.rounded_to_increment(minutes(15), RoundingMode::HalfUp), Ok(time("10:15")));
        assert_eq!(t.rounded_to_increment(minutes(15), RoundingMode::Down), Ok(time("10:00")));
        let six_hours = Duration::of_hours(6).unwrap();
        assert_eq!(
            time("21:00").rounded_to_increment(six_hours, RoundingMode::HalfUp),
            Ok(Time::MIDNIGHT)
        );
        let quarter_second = Duration::of_millis(250);
        assert_eq!(
            time("10:00:00.600").rounded_to_increment(quarter_second, RoundingMode::Up),
            Ok(time("10:00:00.750"))
        );
    }

    #[test]
    fn rejects_increments_that_do_not_tile() {
        for bad in [
            minutes(7),
            minutes(90),
            Duration::of_hours(5).unwrap(),
            Duration::of_hours(25).unwrap(),
            Duration::of_seconds(45),
            Duration::of_nanos(3),
            Duration::ZERO,
            minutes(-15),
        ] {
            let err = time("10:00").rounded_to_increment(bad, RoundingMode::Down).unwrap_err();
            assert_eq!(err, Error::InvalidRoundingIncrement { increment: bad });
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert!(time("10:00").rounded_to_increment(Duration::of_hours(24).unwrap(), RoundingMode::Down).is_ok());
    }

    #[test]
    fn calendar_units_are_unsupported() {
        for unit in [TimeUnit::Weeks, TimeUnit::Months, TimeUnit::Centuries] {
            let err = local("2018-01-01T10:00").rounded_to(unit, RoundingMode::HalfUp).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unsupported);
        }
    }

    #[test]
    fn offsets_are_kept() {
        let offset = UtcOffset::from_hms(5, 30, 0).unwrap();
        let value = local("2018-03-11T10:40").at_offset(offset);
        let rounded = value.rounded_to(TimeUnit::Hours, RoundingMode::HalfUp).unwrap();
        assert_eq!(rounded.to_string(), "2018-03-11T11:00+05:30");
        let time = value.to_offset_time().truncated_to(TimeUnit::Hours).unwrap();
        assert_eq!(time.to_string(), "10:00+05:30");
    }

    #[test]
    fn zoned_values_resolve_again() {
        let zone = TimeZone::fixed(UtcOffset::from_hms(-3, 0, 0).unwrap());
        let value = ZonedDateTime::from_local(local("2018-03-11T10:40:10"), zone).unwrap();
        let rounded = value.rounded_to(TimeUnit::Minutes, RoundingMode::Down).unwrap();
        assert_eq!(rounded.date_time(), local("2018-03-11T10:40"));
        assert_eq!(rounded.offset(), value.offset());
        assert_eq!(value.truncated_to(TimeUnit::Nanoseconds).unwrap(), value);
    }

    #[test]
    fn instants_round_on_utc_midnight() {
        let before_epoch = instant("1969-12-31T18:00:00.5Z");
        assert_eq!(
            before_epoch.truncated_to(TimeUnit::Days).unwrap(),
            instant("1969-12-31T00:00Z")
        );
        assert_eq!(
            before_epoch.rounded_to(TimeUnit::Days, RoundingMode::HalfUp).unwrap(),
            Instant::UNIX_EPOCH
        );
        assert_eq!(
            before_epoch.rounded_to(TimeUnit::Seconds, RoundingMode::HalfUp).unwrap(),
            instant("1969-12-31T18:00:01Z")
        );
        assert_eq!(
            Instant::MAX.rounded_to(TimeUnit::Seconds, RoundingMode::Up).unwrap_err().kind(),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn durations_truncate_toward_zero() {
        let d = Duration::new(-5_400, -1).unwrap();
        assert_eq!(d.truncated_to(TimeUnit::Hours), Ok(Duration::of_hours(-1).unwrap()));
        assert_eq!(d.truncated_to(TimeUnit::Seconds), Ok(Duration::of_seconds(-5_400)));
        let weeks = Duration::of_days(20).unwrap();
        assert_eq!(weeks.truncated_to(TimeUnit::Weeks), Ok(Duration::of_days(14).unwrap()));
        assert_eq!(
            d.truncated_to(TimeUnit::Months).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
    }

    quickcheck! {
        fn prop_rounding_brackets_the_value(value: Instant) -> bool {
            let down = value.truncated_to(TimeUnit::Minutes).unwrap();
            let up = value.rounded_to(TimeUnit::Minutes, RoundingMode::Up).unwrap();
            let nearest = value.rounded_to(TimeUnit::Minutes, RoundingMode::HalfUp).unwrap();
            let minute = minutes(1);
            down <= value
                && value <= up
                && (up == down || down.duration_until(up) == minute)
                && (nearest == down || nearest == up)
                && down.epoch_second().rem_euclid(60) == 0
                && down.nanosecond() == 0
        }

        fn prop_date_time_rounding_agrees_with_time(value: DateTime) -> bool {
            let rounded = value.rounded_to(TimeUnit::Hours, RoundingMode::HalfUp);
            let time = value.time().rounded_to(TimeUnit::Hours, RoundingMode::HalfUp).unwrap();
            match rounded {
                Ok(rounded) => rounded.time() == time && rounded >= value.truncated_to(TimeUnit::Days).unwrap(),
                Err(err) => err.kind() == ErrorKind::Overflow,
            }
        }
    }
}
