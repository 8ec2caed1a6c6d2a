// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sources of the current instant.
//!
//! Code that needs "now" takes a [`Clock`] so tests can pin or shift time.

use crate::date::Date;
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::instant::Instant;
use crate::offset_datetime::OffsetDateTime;
use crate::tz::TimeZone;
use crate::zoned::ZonedDateTime;
use std::fmt;

/// A source of the current instant, paired with a default zone.
pub trait Clock: fmt::Debug + Send + Sync {
    fn read_instant(&self) -> Instant;

    /// Zone used by the `now` constructors.
    fn zone(&self) -> TimeZone;
}

/// The operating system clock, read through `chrono::Utc::now`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    zone: TimeZone,
}

impl SystemClock {
    pub fn utc() -> SystemClock {
        SystemClock::new(TimeZone::utc())
    }

    pub fn new(zone: TimeZone) -> SystemClock {
        SystemClock { zone }
    }
}

impl Default for SystemClock {
    fn default() -> SystemClock {
        SystemClock::utc()
    }
}

impl Clock for SystemClock {
    fn read_instant(&self) -> Instant {
        Instant::from_utc(chrono::Utc::now())
    }

    fn zone(&self) -> TimeZone {
        self.zone.clone()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Instant,
    zone: TimeZone,
}

impl FixedClock {
    pub fn new(instant: Instant, zone: TimeZone) -> FixedClock {
        FixedClock { instant, zone }
    }

    pub fn set(&mut self, instant: Instant) {
        self.instant = instant;
    }

    pub fn advance(&mut self, duration: Duration) -> Result<(), Error> {
        self.instant = self.instant.checked_add(duration)?;
        Ok(())
    }
}

impl Clock for FixedClock {
    fn read_instant(&self) -> Instant {
        self.instant
    }

    fn zone(&self) -> TimeZone {
        self.zone.clone()
    }
}

/// Another clock shifted by a fixed duration.
#[derive(Debug)]
pub struct OffsetClock<C> {
    base: C,
    shift: Duration,
}

impl<C: Clock> OffsetClock<C> {
    pub fn new(base: C, shift: Duration) -> OffsetClock<C> {
        OffsetClock { base, shift }
    }
}

impl<C: Clock> Clock for OffsetClock<C> {
    /// Saturates at the ends of the instant range.
    fn read_instant(&self) -> Instant {
        let base = self.base.read_instant();
        base.checked_add(self.shift).unwrap_or(if self.shift.is_negative() {
            Instant::MIN
        } else {
            Instant::MAX
        })
    }

    fn zone(&self) -> TimeZone {
        self.base.zone()
    }
}

impl Instant {
    pub fn now(clock: &dyn Clock) -> Instant {
        clock.read_instant()
    }
}

impl ZonedDateTime {
    /// The current date-time in the clock's zone.
    pub fn now(clock: &dyn Clock) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::from_instant(clock.read_instant(), clock.zone())
    }
}

impl OffsetDateTime {
    pub fn now(clock: &dyn Clock) -> Result<OffsetDateTime, Error> {
        Ok(ZonedDateTime::now(clock)?.to_offset_date_time())
    }
}

impl DateTime {
    pub fn now(clock: &dyn Clock) -> Result<DateTime, Error> {
        Ok(ZonedDateTime::now(clock)?.date_time())
    }
}

impl Date {
    /// Today in the clock's zone.
    pub fn today(clock: &dyn Clock) -> Result<Date, Error> {
        Ok(ZonedDateTime::now(clock)?.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::UtcOffset;

    fn tokyo() -> TimeZone {
        TimeZone::fixed(UtcOffset::from_hms(9, 0, 0).unwrap())
    }

    #[test]
    fn fixed_clock_reads_what_it_was_given() {
        let start: Instant = "2018-12-31T20:00:00Z".parse().unwrap();
        let mut clock = FixedClock::new(start, tokyo());
        assert_eq!(Instant::now(&clock), start);
        assert_eq!(Date::today(&clock).unwrap(), Date::new(2019, 1, 1).unwrap());
        assert_eq!(
            ZonedDateTime::now(&clock).unwrap().to_string(),
            "2019-01-01T05:00+09:00"
        );
        clock.advance(Duration::of_hours(1).unwrap()).unwrap();
        assert_eq!(DateTime::now(&clock).unwrap().to_string(), "2019-01-01T06:00");
        clock.set(Instant::UNIX_EPOCH);
        assert_eq!(OffsetDateTime::now(&clock).unwrap().to_string(), "1970-01-01T09:00+09:00");
        assert!(clock.advance(Duration::MAX).is_err());
    }

    #[test]
    fn offset_clock_shifts() {
        let base = FixedClock::new(Instant::UNIX_EPOCH, TimeZone::utc());
        let shifted = OffsetClock::new(base, Duration::of_minutes(-90).unwrap());
        assert_eq!(shifted.read_instant().epoch_second(), -5_400);
        let far = OffsetClock::new(
            FixedClock::new(Instant::MAX, TimeZone::utc()),
            Duration::of_seconds(1),
        );
        assert_eq!(far.read_instant(), Instant::MAX);
        assert_eq!(far.zone(), TimeZone::utc());
    }

    #[test]
    fn system_clock_is_recent() {
        let now = Instant::now(&SystemClock::default());
        // 2020-01-01T00:00Z
        assert!(now.epoch_second() > 1_577_836_800);
    }
}
