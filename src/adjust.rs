// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Moving to a weekday or to the edge of a week, month or year.
//!
//! Weekday jumps keep the time of day. Start-of-period adjusters move to
//! midnight and end-of-period adjusters to the last nanosecond of the day.
//! Zoned values resolve the new local date-time again in their zone:
//!
//! | Adjuster | Zoned result |
//! |----------|--------------|
//! | weekday jump | current offset kept when still valid, gaps move forward |
//! | start of a period | earliest instant of the first day |
//! | end of a period | last instant of the last day |

use crate::date::Date;
use crate::datetime::DateTime;
use crate::error::Error;
use crate::math;
use crate::offset_datetime::OffsetDateTime;
use crate::time::Time;
use crate::week::WeekSettings;
use crate::weekday::DayOfWeek;
use crate::zoned::ZonedDateTime;

// Days from `from` forward to `to`, in `0..7`.
fn days_ahead(from: DayOfWeek, to: DayOfWeek) -> i64 {
    math::floor_mod(to.iso_number() as i64 - from.iso_number() as i64, 7)
}

impl Date {
    /// The next `day` strictly after this date.
    pub fn next(self, day: DayOfWeek) -> Result<Date, Error> {
        match days_ahead(self.day_of_week(), day) {
            0 => self.checked_add_days(7),
            ahead => self.checked_add_days(ahead),
        }
    }

    /// This date if it falls on `day`, otherwise the next one.
    pub fn next_or_same(self, day: DayOfWeek) -> Result<Date, Error> {
        self.checked_add_days(days_ahead(self.day_of_week(), day))
    }

    /// The last `day` strictly before this date.
    pub fn previous(self, day: DayOfWeek) -> Result<Date, Error> {
        match days_ahead(day, self.day_of_week()) {
            0 => self.checked_add_days(-7),
            behind => self.checked_add_days(-behind),
        }
    }

    /// This date if it falls on `day`, otherwise the previous one.
    pub fn previous_or_same(self, day: DayOfWeek) -> Result<Date, Error> {
        self.checked_add_days(-days_ahead(day, self.day_of_week()))
    }
}

// ── DateTime ──────────────────────────────────────────────────────────

impl DateTime {
    pub fn next(self, day: DayOfWeek) -> Result<DateTime, Error> {
        Ok(self.with_date(self.date().next(day)?))
    }

    pub fn next_or_same(self, day: DayOfWeek) -> Result<DateTime, Error> {
        Ok(self.with_date(self.date().next_or_same(day)?))
    }

    pub fn previous(self, day: DayOfWeek) -> Result<DateTime, Error> {
        Ok(self.with_date(self.date().previous(day)?))
    }

    pub fn previous_or_same(self, day: DayOfWeek) -> Result<DateTime, Error> {
        Ok(self.with_date(self.date().previous_or_same(day)?))
    }

    #[inline]
    pub fn start_of_day(self) -> DateTime {
        self.with_time(Time::MIDNIGHT)
    }

    #[inline]
    pub fn end_of_day(self) -> DateTime {
        self.with_time(Time::MAX)
    }

    /// Midnight on the first day of the week.
    pub fn start_of_week(self, settings: WeekSettings) -> Result<DateTime, Error> {
        Ok(self.date().start_of_week(settings)?.at(Time::MIDNIGHT))
    }

    /// The last nanosecond of the last day of the week.
    pub fn end_of_week(self, settings: WeekSettings) -> Result<DateTime, Error> {
        Ok(self.date().end_of_week(settings)?.at(Time::MAX))
    }

    pub fn start_of_month(self) -> DateTime {
        self.date().start_of_month().at(Time::MIDNIGHT)
    }

    pub fn end_of_month(self) -> DateTime {
        self.date().end_of_month().at(Time::MAX)
    }

    pub fn start_of_year(self) -> DateTime {
        self.date().start_of_year().at(Time::MIDNIGHT)
    }

    pub fn end_of_year(self) -> DateTime {
        self.date().end_of_year().at(Time::MAX)
    }
}

// ── OffsetDateTime ────────────────────────────────────────────────────

impl OffsetDateTime {
    // Replaces the local date-time, keeping the offset.
    fn map_local(
        self,
        f: impl FnOnce(DateTime) -> Result<DateTime, Error>,
    ) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::new(f(self.date_time())?, self.offset()))
    }

    pub fn next(self, day: DayOfWeek) -> Result<OffsetDateTime, Error> {
        self.map_local(|dt| dt.next(day))
    }

    pub fn next_or_same(self, day: DayOfWeek) -> Result<OffsetDateTime, Error> {
        self.map_local(|dt| dt.next_or_same(day))
    }

    pub fn previous(self, day: DayOfWeek) -> Result<OffsetDateTime, Error> {
        self.map_local(|dt| dt.previous(day))
    }

    pub fn previous_or_same(self, day: DayOfWeek) -> Result<OffsetDateTime, Error> {
        self.map_local(|dt| dt.previous_or_same(day))
    }

    pub fn start_of_week(self, settings: WeekSettings) -> Result<OffsetDateTime, Error> {
        self.map_local(|dt| dt.start_of_week(settings))
    }

    pub fn end_of_week(self, settings: WeekSettings) -> Result<OffsetDateTime, Error> {
        self.map_local(|dt| dt.end_of_week(settings))
    }

    pub fn start_of_month(self) -> OffsetDateTime {
        OffsetDateTime::new(self.date_time().start_of_month(), self.offset())
    }

    pub fn end_of_month(self) -> OffsetDateTime {
        OffsetDateTime::new(self.date_time().end_of_month(), self.offset())
    }

    pub fn start_of_year(self) -> OffsetDateTime {
        OffsetDateTime::new(self.date_time().start_of_year(), self.offset())
    }

    pub fn end_of_year(self) -> OffsetDateTime {
        OffsetDateTime::new(self.date_time().end_of_year(), self.offset())
    }
}

// ── ZonedDateTime ─────────────────────────────────────────────────────

impl ZonedDateTime {
    fn jump(
        &self,
        f: impl FnOnce(DateTime) -> Result<DateTime, Error>,
    ) -> Result<ZonedDateTime, Error> {
        let date_time = f(self.date_time())?;
        ZonedDateTime::from_local_preferring(date_time, self.zone().clone(), self.offset())
    }

    pub fn next(&self, day: DayOfWeek) -> Result<ZonedDateTime, Error> {
        self.jump(|dt| dt.next(day))
    }

    pub fn next_or_same(&self, day: DayOfWeek) -> Result<ZonedDateTime, Error> {
        self.jump(|dt| dt.next_or_same(day))
    }

    pub fn previous(&self, day: DayOfWeek) -> Result<ZonedDateTime, Error> {
        self.jump(|dt| dt.previous(day))
    }

    pub fn previous_or_same(&self, day: DayOfWeek) -> Result<ZonedDateTime, Error> {
        self.jump(|dt| dt.previous_or_same(day))
    }

    /// The earliest instant of this date in the zone.
    pub fn start_of_day(&self) -> Result<ZonedDateTime, Error> {
        self.date().start_of_day_at(self.zone().clone())
    }

    /// The last instant of this date in the zone.
    pub fn end_of_day(&self) -> Result<ZonedDateTime, Error> {
        self.date().end_of_day_at(self.zone().clone())
    }

    pub fn start_of_week(&self, settings: WeekSettings) -> Result<ZonedDateTime, Error> {
        let first = self.date().start_of_week(settings)?;
        first.start_of_day_at(self.zone().clone())
    }

    pub fn end_of_week(&self, settings: WeekSettings) -> Result<ZonedDateTime, Error> {
        let last = self.date().end_of_week(settings)?;
        last.end_of_day_at(self.zone().clone())
    }

    pub fn start_of_month(&self) -> Result<ZonedDateTime, Error> {
        self.date().start_of_month().start_of_day_at(self.zone().clone())
    }

    pub fn end_of_month(&self) -> Result<ZonedDateTime, Error> {
        self.date().end_of_month().end_of_day_at(self.zone().clone())
    }

    pub fn start_of_year(&self) -> Result<ZonedDateTime, Error> {
        self.date().start_of_year().start_of_day_at(self.zone().clone())
    }

    pub fn end_of_year(&self) -> Result<ZonedDateTime, Error> {
        self.date().end_of_year().end_of_day_at(self.zone().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::UtcOffset;
    use crate::tz::TimeZone;
    use crate::ErrorKind;
    use quickcheck::quickcheck;

    fn d(y: i32, m: u8, day: u8) -> Date {
        Date::new(y, m, day).unwrap()
    }

    fn local(text: &str) -> DateTime {
        text.parse().unwrap()
    }

    #[test]
    fn weekday_jumps() {
        // 2018-01-31 is a Wednesday.
        let date = d(2018, 1, 31);
        assert_eq!(date.next(DayOfWeek::Wednesday), Ok(d(2018, 2, 7)));
        assert_eq!(date.next(DayOfWeek::Friday), Ok(d(2018, 2, 2)));
        assert_eq!(date.next_or_same(DayOfWeek::Wednesday), Ok(date));
        assert_eq!(date.next_or_same(DayOfWeek::Tuesday), Ok(d(2018, 2, 6)));
        assert_eq!(date.previous(DayOfWeek::Wednesday), Ok(d(2018, 1, 24)));
        assert_eq!(date.previous(DayOfWeek::Monday), Ok(d(2018, 1, 29)));
        assert_eq!(date.previous_or_same(DayOfWeek::Wednesday), Ok(date));
        assert_eq!(date.previous_or_same(DayOfWeek::Thursday), Ok(d(2018, 1, 25)));
    }

    #[test]
    fn jumps_fail_at_range_ends() {
        let day = Date::MAX.day_of_week();
        assert_eq!(Date::MAX.next(day).unwrap_err().kind(), ErrorKind::Overflow);
        assert_eq!(Date::MAX.next_or_same(day), Ok(Date::MAX));
        assert_eq!(Date::MIN.previous(Date::MIN.day_of_week()).unwrap_err().kind(), ErrorKind::Overflow);
    }

    #[test]
    fn date_time_adjusters_keep_or_reset_the_time() {
        let value = local("2020-02-12T10:15:30");
        assert_eq!(value.next(DayOfWeek::Monday), Ok(local("2020-02-17T10:15:30")));
        assert_eq!(value.previous_or_same(DayOfWeek::Sunday), Ok(local("2020-02-09T10:15:30")));
        assert_eq!(value.start_of_month(), local("2020-02-01T00:00"));
        assert_eq!(value.end_of_month(), d(2020, 2, 29).at(Time::MAX));
        assert_eq!(value.start_of_year(), local("2020-01-01T00:00"));
        assert_eq!(value.end_of_year(), d(2020, 12, 31).at(Time::MAX));
        assert_eq!(value.start_of_week(WeekSettings::ISO), Ok(local("2020-02-10T00:00")));
        assert_eq!(value.end_of_week(WeekSettings::ISO), Ok(d(2020, 2, 16).at(Time::MAX)));
        assert_eq!(value.start_of_day(), local("2020-02-12T00:00"));
    }

    #[test]
    fn offset_adjusters_keep_the_offset() {
        let offset = UtcOffset::from_hms(-7, 0, 0).unwrap();
        let value = local("2020-02-12T10:15").at_offset(offset);
        assert_eq!(value.start_of_year().to_string(), "2020-01-01T00:00-07:00");
        assert_eq!(
            value.next(DayOfWeek::Thursday).unwrap().to_string(),
            "2020-02-13T10:15-07:00"
        );
        assert_eq!(value.end_of_month().date_time(), d(2020, 2, 29).at(Time::MAX));
        assert_eq!(value.start_of_week(WeekSettings::SUNDAY_START).unwrap().date(), d(2020, 2, 9));
    }

    #[test]
    fn zoned_adjusters_stay_in_the_zone() {
        let zone = TimeZone::fixed(UtcOffset::from_hms(1, 0, 0).unwrap());
        let value = ZonedDateTime::from_local(local("2020-02-12T10:15"), zone.clone()).unwrap();
        let next = value.next(DayOfWeek::Saturday).unwrap();
        assert_eq!(next.date_time(), local("2020-02-15T10:15"));
        assert_eq!(next.zone(), &zone);
        assert_eq!(value.start_of_month().unwrap().date_time(), local("2020-02-01T00:00"));
        assert_eq!(value.end_of_year().unwrap().date_time(), d(2020, 12, 31).at(Time::MAX));
        let week = value.start_of_week(WeekSettings::ISO).unwrap();
        assert_eq!(week.date_time(), local("2020-02-10T00:00"));
        assert!(value.end_of_week(WeekSettings::ISO).unwrap() > value);
    }

    quickcheck! {
        fn prop_jumps_land_on_the_weekday(date: Date, target: u8) -> bool {
            let target = DayOfWeek::from_iso_number(target as i64 % 7 + 1).unwrap();
            let checks = [
                (date.next(target), 1..=7),
                (date.next_or_same(target), 0..=6),
                (date.previous(target), -7..=-1),
                (date.previous_or_same(target), -6..=0),
            ];
            checks.into_iter().all(|(result, span)| match result {
                Ok(moved) => moved.day_of_week() == target && span.contains(&date.days_until(moved)),
                Err(err) => err.kind() == ErrorKind::Overflow,
            })
        }
    }
}
